//! Reference token helpers.
//!
//! Paths into the bound data are sequences of reference tokens. A token that
//! addresses a sequence element must be a canonical non-negative integer: `0`, or
//! digits without a leading zero.

/// Token that addresses the slot past the end of a sequence.
pub const APPEND_TOKEN: &str = "-";

/// Check whether a token is a canonical array index.
#[inline]
pub fn is_array_index(token: &str) -> bool {
    match token.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// Parse a canonical array index token.
#[inline]
pub fn parse_array_index(token: &str) -> Option<usize> {
    if is_array_index(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Check whether a token names a sequence slot, either by index or by append.
#[inline]
pub fn is_sequence_token(token: &str) -> bool {
    token == APPEND_TOKEN || is_array_index(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_indices() {
        assert!(is_array_index("0"));
        assert!(is_array_index("12"));
        assert!(!is_array_index("012"));
        assert!(!is_array_index(""));
        assert!(!is_array_index("-1"));
        assert!(!is_array_index("1a"));
    }

    #[test]
    fn test_parse_array_index() {
        assert_eq!(parse_array_index("3"), Some(3));
        assert_eq!(parse_array_index("03"), None);
        assert_eq!(parse_array_index("name"), None);
        // Overflowing indices are not addressable
        assert_eq!(parse_array_index("99999999999999999999999"), None);
    }

    #[test]
    fn test_sequence_tokens() {
        assert!(is_sequence_token("-"));
        assert!(is_sequence_token("4"));
        assert!(!is_sequence_token("name"));
    }
}
