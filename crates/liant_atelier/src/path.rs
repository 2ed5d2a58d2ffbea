//! Path resolution against the bound data root.
//!
//! A [`Path`] is a parsed list of reference tokens. Two textual dialects map onto
//! it:
//!
//! - [`PathDialect::Pointer`]: `/users/0/name`, with `~0` for `~` and `~1` for `/`
//! - [`PathDialect::Dot`]: `users.0.name`
//!
//! Both dialects share one auto-vivification rule: when [`set`] has to create a
//! missing intermediate container, it creates a sequence if the *next* token is a
//! canonical array index (or the append token `-`), and a mapping otherwise.

use std::fmt;

use liant_carton::{
    is_sequence_token, parse_array_index, CompactString, SmallVec, ToCompactString,
    APPEND_TOKEN,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BindError, BindResult};

/// Most `null` slots a single write may pad a sequence with.
pub const MAX_PADDING: usize = 1024;

/// Textual syntax used for paths in annotations and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathDialect {
    /// Slash-separated reference tokens (`/user/name`)
    #[default]
    Pointer,
    /// Dot-separated keys (`user.name`)
    Dot,
}

impl PathDialect {
    /// The character separating tokens in this dialect.
    #[inline]
    pub fn delimiter(self) -> char {
        match self {
            PathDialect::Pointer => '/',
            PathDialect::Dot => '.',
        }
    }
}

/// A location in the bound data root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    tokens: SmallVec<[CompactString; 4]>,
}

impl Path {
    /// The path addressing the whole data root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-decoded tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CompactString>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a path written in `dialect`.
    pub fn parse(dialect: PathDialect, text: &str) -> BindResult<Self> {
        if text.is_empty() {
            return Ok(Self::root());
        }

        match dialect {
            PathDialect::Pointer => {
                let Some(rest) = text.strip_prefix('/') else {
                    return Err(BindError::invalid_path(text, "pointer must start with `/`"));
                };
                let tokens = rest
                    .split('/')
                    .map(|raw| {
                        unescape_token(raw).map_err(|reason| BindError::invalid_path(text, reason))
                    })
                    .collect::<BindResult<_>>()?;
                Ok(Self { tokens })
            }
            PathDialect::Dot => Ok(Self::from_tokens(text.split('.'))),
        }
    }

    /// Write the path back in `dialect`. Inverse of [`Path::parse`].
    ///
    /// The dot dialect has no escaping, so tokens containing `.` do not survive a
    /// round trip through it.
    pub fn compile(&self, dialect: PathDialect) -> String {
        match dialect {
            PathDialect::Pointer => {
                let mut out = String::new();
                for token in &self.tokens {
                    out.push('/');
                    escape_token_into(token, &mut out);
                }
                out
            }
            PathDialect::Dot => {
                let mut out = String::new();
                for (position, token) in self.tokens.iter().enumerate() {
                    if position > 0 {
                        out.push('.');
                    }
                    out.push_str(token);
                }
                out
            }
        }
    }

    /// The decoded reference tokens.
    #[inline]
    pub fn tokens(&self) -> &[CompactString] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether this path addresses the whole data root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append a token.
    pub fn push(&mut self, token: impl Into<CompactString>) {
        self.tokens.push(token.into());
    }

    /// Remove the last token.
    pub fn pop(&mut self) -> Option<CompactString> {
        self.tokens.pop()
    }

    /// A copy of this path extended by one token.
    pub fn child(&self, token: impl Into<CompactString>) -> Self {
        let mut child = self.clone();
        child.push(token);
        child
    }

    /// Whether `prefix` is a token-wise prefix of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.tokens.len() >= prefix.tokens.len()
            && self.tokens[..prefix.tokens.len()] == prefix.tokens[..]
    }

    /// Replace the token right after `prefix` with `index`.
    ///
    /// Returns `None` when `prefix` is not an exact token-wise prefix of this path,
    /// or when nothing follows it.
    pub fn rebase_index(&self, prefix: &Path, index: usize) -> Option<Path> {
        if self.tokens.len() <= prefix.tokens.len() || !self.starts_with(prefix) {
            return None;
        }
        let mut rebased = self.clone();
        rebased.tokens[prefix.tokens.len()] = index.to_compact_string();
        Some(rebased)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compile(PathDialect::Pointer))
    }
}

fn unescape_token(raw: &str) -> Result<CompactString, String> {
    if !raw.contains('~') {
        return Ok(CompactString::from(raw));
    }

    let mut out = CompactString::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                Some(other) => return Err(format!("invalid escape `~{other}` in token")),
                None => return Err("trailing `~` in token".to_string()),
            }
        } else {
            out.push(ch);
        }
    }

    Ok(out)
}

fn escape_token_into(token: &str, out: &mut String) {
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(ch),
        }
    }
}

/// Resolve `path` in `root`. `None` means the location does not exist.
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    path.tokens().iter().try_fold(root, |current, token| match current {
        Value::Object(map) => map.get(token.as_str()),
        Value::Array(items) => parse_array_index(token).and_then(|index| items.get(index)),
        _ => None,
    })
}

/// Whether `path` exists in `root`. Never fails on missing intermediates.
#[inline]
pub fn has(root: &Value, path: &Path) -> bool {
    get(root, path).is_some()
}

/// Store `value` at `path`, creating intermediate containers as needed.
///
/// Missing or `null` intermediates are replaced by a sequence when the next token
/// is an array index or `-`, and by a mapping otherwise. Inside a sequence, `-` and
/// an index equal to the length append; an index past the end pads with `null`,
/// up to [`MAX_PADDING`] slots. A farther index is an `InvalidPath`.
pub fn set(root: &mut Value, path: &Path, value: Value) -> BindResult<()> {
    let tokens = path.tokens();
    let Some((last, parents)) = tokens.split_last() else {
        *root = value;
        return Ok(());
    };

    if root.is_null() {
        *root = empty_container_for(&tokens[0]);
    }

    let mut current = root;
    for (position, token) in parents.iter().enumerate() {
        current = descend_or_create(current, token, &tokens[position + 1], path)?;
    }

    *slot_mut(current, last, path)? = value;
    Ok(())
}

/// Remove the value at `path` and return it.
pub fn remove(root: &mut Value, path: &Path) -> Option<Value> {
    let (last, parents) = path.tokens().split_last()?;

    let mut current = root;
    for token in parents {
        current = child_mut(current, token)?;
    }

    match current {
        Value::Object(map) => map.shift_remove(last.as_str()),
        Value::Array(items) => {
            let index = parse_array_index(last)?;
            (index < items.len()).then(|| items.remove(index))
        }
        _ => None,
    }
}

/// Pair every scalar leaf of `root` with its full path, in document order.
///
/// Containers are recursed into and never reported themselves, so empty mappings
/// and sequences contribute nothing.
pub fn flatten(root: &Value) -> Vec<(Path, &Value)> {
    let mut leaves = Vec::new();
    let mut prefix = Path::root();
    flatten_into(root, &mut prefix, &mut leaves);
    leaves
}

fn flatten_into<'a>(value: &'a Value, prefix: &mut Path, leaves: &mut Vec<(Path, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                prefix.push(key.as_str());
                flatten_into(child, prefix, leaves);
                prefix.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                prefix.push(index.to_compact_string());
                flatten_into(child, prefix, leaves);
                prefix.pop();
            }
        }
        leaf => {
            if !prefix.is_root() {
                leaves.push((prefix.clone(), leaf));
            }
        }
    }
}

fn empty_container_for(next: &str) -> Value {
    if is_sequence_token(next) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn descend_or_create<'a>(
    value: &'a mut Value,
    token: &str,
    next: &str,
    path: &Path,
) -> BindResult<&'a mut Value> {
    let slot = slot_mut(value, token, path)?;
    if slot.is_null() {
        *slot = empty_container_for(next);
    }
    if slot.is_object() || slot.is_array() {
        Ok(slot)
    } else {
        Err(unreachable(path))
    }
}

/// The slot for `token` inside a container, inserting `null` when it is missing.
fn slot_mut<'a>(value: &'a mut Value, token: &str, path: &Path) -> BindResult<&'a mut Value> {
    match value {
        Value::Object(map) => Ok(map.entry(token).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = if token == APPEND_TOKEN {
                items.len()
            } else {
                parse_array_index(token).ok_or_else(|| {
                    BindError::invalid_path(
                        &path.to_string(),
                        format!("`{token}` is not an array index"),
                    )
                })?
            };
            if index >= items.len() {
                let len = index
                    .checked_add(1)
                    .filter(|&len| len - items.len() <= MAX_PADDING + 1)
                    .ok_or_else(|| {
                        BindError::invalid_path(
                            &path.to_string(),
                            format!("index {index} is too far past the end of the sequence"),
                        )
                    })?;
                items.resize(len, Value::Null);
            }
            Ok(&mut items[index])
        }
        _ => Err(unreachable(path)),
    }
}

fn child_mut<'a>(value: &'a mut Value, token: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(token),
        Value::Array(items) => parse_array_index(token).and_then(move |index| items.get_mut(index)),
        _ => None,
    }
}

fn unreachable(path: &Path) -> BindError {
    BindError::Unreachable {
        path: path.to_string(),
    }
}
