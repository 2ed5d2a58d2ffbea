//! Error types for the binding engine.

use thiserror::Error;

/// Errors raised while binding data to a document.
///
/// None of these are retried: every operation is synchronous and in-memory, so a
/// failure is deterministic and points at malformed input or markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A path string does not follow its dialect's syntax
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A repeat container had no child to capture as its template
    #[error("repeat container {container} needs a template node")]
    TemplateMissing { container: String },

    /// An element selected for an annotation does not carry it
    #[error("element {element} carries no `{attribute}` annotation")]
    MissingAnnotation { element: String, attribute: String },

    /// A write would have to descend through a scalar value
    #[error("cannot create `{path}` through a non-container value")]
    Unreachable { path: String },
}

impl BindError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        BindError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BindError::invalid_path("user", "must start with `/`");
        assert_eq!(err.to_string(), "invalid path `user`: must start with `/`");

        let err = BindError::TemplateMissing {
            container: "#4".to_string(),
        };
        assert_eq!(err.to_string(), "repeat container #4 needs a template node");
    }
}
