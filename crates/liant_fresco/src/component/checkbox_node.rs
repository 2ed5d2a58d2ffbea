//! Checkbox component - boolean toggle.

use compact_str::CompactString;
use liant_atelier::DEFAULT_BIND_ATTRIBUTE;

use super::Component;
use crate::render::{Attributes, CheckboxContent, ElementNode, NodeId, NodeKind};

/// Builder for checkboxes.
#[derive(Debug, Clone)]
pub struct CheckboxNode {
    checked: bool,
    attributes: Attributes,
}

impl Default for CheckboxNode {
    fn default() -> Self {
        let mut attributes = Attributes::new();
        attributes.set("type", "checkbox");
        Self {
            checked: false,
            attributes,
        }
    }
}

impl CheckboxNode {
    /// Create a new, unchecked checkbox builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Add a binding annotation.
    pub fn bind(self, annotation: impl Into<CompactString>) -> Self {
        self.attr(DEFAULT_BIND_ATTRIBUTE, annotation)
    }
}

impl Component for CheckboxNode {
    fn build(self, id: NodeId) -> ElementNode {
        let content = CheckboxContent {
            checked: self.checked,
        };
        ElementNode::new(id, "input", NodeKind::Checkbox(content)).with_attributes(self.attributes)
    }
}
