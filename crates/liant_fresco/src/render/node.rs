//! Element node definitions.

use compact_str::CompactString;
use smallvec::SmallVec;

/// Unique identifier for element nodes.
pub type NodeId = u64;

/// A node in the element tree.
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Unique node ID
    pub id: NodeId,
    /// Element tag, e.g. `li`
    pub tag: CompactString,
    /// Control type and state
    pub kind: NodeKind,
    pub attributes: Attributes,
    /// Text held directly by this element
    pub text: CompactString,
    /// Child node IDs, in order
    pub children: SmallVec<[NodeId; 4]>,
    /// Parent node ID, `None` for roots and detached nodes
    pub parent: Option<NodeId>,
}

impl ElementNode {
    /// Create a new element node.
    pub fn new(id: NodeId, tag: impl Into<CompactString>, kind: NodeKind) -> Self {
        Self {
            id,
            tag: tag.into(),
            kind,
            attributes: Attributes::default(),
            text: CompactString::default(),
            children: SmallVec::new(),
            parent: None,
        }
    }

    /// Create a plain container element.
    pub fn container(id: NodeId, tag: impl Into<CompactString>) -> Self {
        Self::new(id, tag, NodeKind::Box)
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_text(mut self, text: impl Into<CompactString>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a child.
    pub fn add_child(&mut self, child_id: NodeId) {
        self.children.push(child_id);
    }

    /// Remove a child.
    pub fn remove_child(&mut self, child_id: NodeId) {
        if let Some(pos) = self.children.iter().position(|&id| id == child_id) {
            self.children.remove(pos);
        }
    }
}

/// Control variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain container or text holder
    Box,
    /// Text entry
    Input(InputContent),
    /// Boolean toggle
    Checkbox(CheckboxContent),
    /// Choice among options
    Select(SelectContent),
}

/// State of a text entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputContent {
    /// Current input value
    pub value: CompactString,
    /// Whether the entry accepts line breaks
    pub multiline: bool,
}

impl InputContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<CompactString>) -> Self {
        self.value = value.into();
        self
    }
}

/// State of a checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxContent {
    pub checked: bool,
}

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: CompactString,
    pub label: CompactString,
}

impl SelectOption {
    /// An option whose label is its value.
    pub fn new(value: impl Into<CompactString>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn labeled(value: impl Into<CompactString>, label: impl Into<CompactString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// State of a select control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectContent {
    pub options: SmallVec<[SelectOption; 4]>,
    /// Index of the selected option
    pub selected: Option<usize>,
}

impl SelectContent {
    /// Value of the selected option.
    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.value.as_str())
    }

    /// Select the option whose value is `value`. Returns whether one matched.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }
}

/// Element attributes, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: SmallVec<[(CompactString, CompactString); 4]>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<CompactString> {
        let pos = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
