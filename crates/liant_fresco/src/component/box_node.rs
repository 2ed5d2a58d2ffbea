//! Box component - plain container element.

use compact_str::CompactString;
use liant_atelier::{DEFAULT_BIND_ATTRIBUTE, DEFAULT_EACH_ATTRIBUTE};

use super::Component;
use crate::render::{Attributes, ElementNode, NodeId};

/// Builder for container elements.
#[derive(Debug, Clone, Default)]
pub struct BoxNode {
    tag: CompactString,
    attributes: Attributes,
    text: CompactString,
}

impl BoxNode {
    /// Create a new container builder.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Add a binding annotation.
    pub fn bind(self, annotation: impl Into<CompactString>) -> Self {
        self.attr(DEFAULT_BIND_ATTRIBUTE, annotation)
    }

    /// Mark as a repeat container for the sequence at `path`.
    pub fn each(self, path: impl Into<CompactString>) -> Self {
        self.attr(DEFAULT_EACH_ATTRIBUTE, path)
    }

    /// Set the element's own text.
    pub fn text(mut self, text: impl Into<CompactString>) -> Self {
        self.text = text.into();
        self
    }
}

impl Component for BoxNode {
    fn build(self, id: NodeId) -> ElementNode {
        ElementNode::container(id, self.tag)
            .with_attributes(self.attributes)
            .with_text(self.text)
    }
}
