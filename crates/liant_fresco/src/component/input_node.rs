//! Input component - text entry.

use compact_str::CompactString;
use liant_atelier::DEFAULT_BIND_ATTRIBUTE;

use super::Component;
use crate::render::{Attributes, ElementNode, InputContent, NodeId, NodeKind};

/// Builder for text entries.
#[derive(Debug, Clone, Default)]
pub struct InputNode {
    value: CompactString,
    multiline: bool,
    attributes: Attributes,
}

impl InputNode {
    /// Create a new input builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input value.
    pub fn value(mut self, value: impl Into<CompactString>) -> Self {
        self.value = value.into();
        self
    }

    /// Accept line breaks, like a textarea.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
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

impl Component for InputNode {
    fn build(self, id: NodeId) -> ElementNode {
        let content = InputContent {
            value: self.value,
            multiline: self.multiline,
        };
        let tag = if content.multiline { "textarea" } else { "input" };
        ElementNode::new(id, tag, NodeKind::Input(content)).with_attributes(self.attributes)
    }
}
