//! Text component - element holding text.

use compact_str::CompactString;
use liant_atelier::DEFAULT_BIND_ATTRIBUTE;

use super::Component;
use crate::render::{Attributes, ElementNode, NodeId};

/// Builder for text elements.
#[derive(Debug, Clone, Default)]
pub struct TextNode {
    tag: CompactString,
    text: CompactString,
    attributes: Attributes,
}

impl TextNode {
    /// Create a new text element builder.
    pub fn new(tag: impl Into<CompactString>, text: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            ..Default::default()
        }
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

impl Component for TextNode {
    fn build(self, id: NodeId) -> ElementNode {
        ElementNode::container(id, self.tag)
            .with_attributes(self.attributes)
            .with_text(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node() {
        let node = TextNode::new("li", "x").bind(":/users/0/name").build(3);
        assert_eq!(node.text.as_str(), "x");
        assert_eq!(node.attributes.get("data-bind"), Some(":/users/0/name"));
    }
}
