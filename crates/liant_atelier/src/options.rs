//! Instance options.

use serde::{Deserialize, Serialize};

use crate::changes::NotifyMode;
use crate::path::PathDialect;

/// Event name that asks an instance to run a full read cycle.
pub const READ_EVENT: &str = "read";

pub const DEFAULT_BIND_ATTRIBUTE: &str = "data-bind";
pub const DEFAULT_EACH_ATTRIBUTE: &str = "data-each";

/// Events handled unless configured otherwise.
pub const DEFAULT_EVENTS: [&str; 5] = ["checked", "selected", "input", "change", READ_EVENT];

/// Built-in binding plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginKind {
    /// Keeps repeat containers in step with sequences
    Each,
    /// Propagates values between elements and data
    Bind,
}

/// Options for a binding instance.
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```
/// use liant_atelier::{BindOptions, PathDialect};
///
/// let options = BindOptions::from_json(r#"{ "dialect": "dot", "updateData": false }"#).unwrap();
/// assert_eq!(options.dialect, PathDialect::Dot);
/// assert!(!options.update_data);
/// assert_eq!(options.bind_attribute, "data-bind");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BindOptions {
    /// UI event names that trigger propagation
    pub events: Vec<String>,
    /// Commit UI-driven edits into the data
    pub update_data: bool,
    /// Plugins to run, in order
    pub plugins: Vec<PluginKind>,
    pub dialect: PathDialect,
    pub notify: NotifyMode,
    pub bind_attribute: String,
    pub each_attribute: String,
    /// Coerce strings read from the document toward the type already in the data
    pub preserve_types: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS.iter().map(|name| name.to_string()).collect(),
            update_data: true,
            plugins: vec![PluginKind::Each, PluginKind::Bind],
            dialect: PathDialect::default(),
            notify: NotifyMode::default(),
            bind_attribute: DEFAULT_BIND_ATTRIBUTE.to_string(),
            each_attribute: DEFAULT_EACH_ATTRIBUTE.to_string(),
            preserve_types: true,
        }
    }
}

impl BindOptions {
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// Whether UI events named `name` are handled.
    pub fn listens_to(&self, name: &str) -> bool {
        self.events.iter().any(|event| event == name)
    }

    pub fn with_dialect(mut self, dialect: PathDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_update_data(mut self, update_data: bool) -> Self {
        self.update_data = update_data;
        self
    }

    pub fn with_notify(mut self, notify: NotifyMode) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_plugins(mut self, plugins: impl IntoIterator<Item = PluginKind>) -> Self {
        self.plugins = plugins.into_iter().collect();
        self
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }
}
