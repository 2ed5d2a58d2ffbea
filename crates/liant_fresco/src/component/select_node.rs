//! Select component - choice among options.

use compact_str::CompactString;
use liant_atelier::DEFAULT_BIND_ATTRIBUTE;
use smallvec::SmallVec;

use super::Component;
use crate::render::{Attributes, ElementNode, NodeId, NodeKind, SelectContent, SelectOption};

/// Builder for select controls.
#[derive(Debug, Clone, Default)]
pub struct SelectNode {
    options: SmallVec<[SelectOption; 4]>,
    selected: Option<CompactString>,
    attributes: Attributes,
}

impl SelectNode {
    /// Create a new select builder with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option labeled by its value.
    pub fn option(mut self, value: impl Into<CompactString>) -> Self {
        self.options.push(SelectOption::new(value));
        self
    }

    pub fn labeled_option(
        mut self,
        value: impl Into<CompactString>,
        label: impl Into<CompactString>,
    ) -> Self {
        self.options.push(SelectOption::labeled(value, label));
        self
    }

    /// Preselect the option with `value`. Defaults to the first option.
    pub fn selected(mut self, value: impl Into<CompactString>) -> Self {
        self.selected = Some(value.into());
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

impl Component for SelectNode {
    fn build(self, id: NodeId) -> ElementNode {
        let selected = match &self.selected {
            Some(value) => self.options.iter().position(|option| option.value == *value),
            None if self.options.is_empty() => None,
            None => Some(0),
        };
        let content = SelectContent {
            options: self.options,
            selected,
        };
        ElementNode::new(id, "select", NodeKind::Select(content)).with_attributes(self.attributes)
    }
}
