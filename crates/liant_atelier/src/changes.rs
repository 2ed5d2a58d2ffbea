//! Staged data changes and their notification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BindResult;
use crate::path::{self, Path, PathDialect};

/// A single committed change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Path in the instance's dialect
    pub path: String,
    pub value: Value,
}

/// Payload of the `changed` notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum Changed {
    /// The changes committed since the previous notification, in commit order
    Paths(Vec<Change>),
    /// A snapshot of the whole data root
    Root(Value),
}

/// What the `changed` notification carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotifyMode {
    #[default]
    Paths,
    Root,
}

/// Changes committed during the current cycle.
///
/// The dirty flag is only raised by a change that actually altered the data, so
/// a cycle that reads back what it wrote notifies nobody.
#[derive(Debug, Default)]
pub struct ChangeSet {
    dirty: bool,
    committed: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `value` at `path` when it differs from the current data.
    ///
    /// Returns whether the data changed.
    pub fn add(
        &mut self,
        data: &mut Value,
        path: &Path,
        value: Value,
        dialect: PathDialect,
    ) -> BindResult<bool> {
        if path::get(data, path) == Some(&value) {
            return Ok(false);
        }

        path::set(data, path, value.clone())?;
        self.dirty = true;

        let rendered = path.compile(dialect);
        match self.committed.iter_mut().find(|change| change.path == rendered) {
            Some(existing) => existing.value = value,
            None => self.committed.push(Change {
                path: rendered,
                value,
            }),
        }

        Ok(true)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take the notification payload and reset, if anything changed.
    pub fn take(&mut self, data: &Value, mode: NotifyMode) -> Option<Changed> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        let committed = std::mem::take(&mut self.committed);
        Some(match mode {
            NotifyMode::Paths => Changed::Paths(committed),
            NotifyMode::Root => Changed::Root(data.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pointer(text: &str) -> Path {
        Path::parse(PathDialect::Pointer, text).unwrap()
    }

    #[test]
    fn test_equal_values_are_not_changes() {
        let mut data = json!({"a": 1});
        let mut changes = ChangeSet::new();
        let changed = changes
            .add(&mut data, &pointer("/a"), json!(1), PathDialect::Pointer)
            .unwrap();
        assert!(!changed);
        assert!(!changes.is_dirty());
        assert_eq!(changes.take(&data, NotifyMode::Paths), None);
    }

    #[test]
    fn test_take_paths() {
        let mut data = json!({"a": 1});
        let mut changes = ChangeSet::new();
        changes
            .add(&mut data, &pointer("/a"), json!(2), PathDialect::Dot)
            .unwrap();
        changes
            .add(&mut data, &pointer("/b/c"), json!("x"), PathDialect::Dot)
            .unwrap();
        changes
            .add(&mut data, &pointer("/a"), json!(3), PathDialect::Dot)
            .unwrap();

        assert_eq!(data, json!({"a": 3, "b": {"c": "x"}}));
        assert_eq!(
            changes.take(&data, NotifyMode::Paths),
            Some(Changed::Paths(vec![
                Change {
                    path: "a".to_string(),
                    value: json!(3)
                },
                Change {
                    path: "b.c".to_string(),
                    value: json!("x")
                },
            ]))
        );
        assert!(!changes.is_dirty());
        assert_eq!(changes.take(&data, NotifyMode::Paths), None);
    }

    #[test]
    fn test_take_root() {
        let mut data = json!({});
        let mut changes = ChangeSet::new();
        changes
            .add(&mut data, &pointer("/n"), json!(1), PathDialect::Pointer)
            .unwrap();
        assert_eq!(
            changes.take(&data, NotifyMode::Root),
            Some(Changed::Root(json!({"n": 1})))
        );
    }

    #[test]
    fn test_notification_payload() {
        let changed = Changed::Paths(vec![Change {
            path: "a".to_string(),
            value: json!(3),
        }]);
        insta::assert_snapshot!(
            serde_json::to_string(&changed).unwrap(),
            @r#"{"kind":"paths","payload":[{"path":"a","value":3}]}"#
        );
        let changed = Changed::Root(json!({"n": 1}));
        insta::assert_snapshot!(
            serde_json::to_string(&changed).unwrap(),
            @r#"{"kind":"root","payload":{"n":1}}"#
        );
    }
}
