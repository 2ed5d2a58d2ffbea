//! A minimal in-memory document for unit tests.
//!
//! Every element is a generic control whose value lives in its `value`
//! attribute, except those with a `type` attribute of `text` or `checkbox`.

use liant_carton::FxHashMap;

use crate::document::{ControlKind, Document};

#[derive(Debug, Default, Clone)]
struct MockNode {
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: Vec<(String, String)>,
    text: String,
    value: String,
    checked: bool,
}

#[derive(Debug)]
pub(crate) struct MockDocument {
    nodes: FxHashMap<usize, MockNode>,
    next_id: usize,
}

impl MockDocument {
    /// A document holding only the root element `0`.
    pub(crate) fn new() -> Self {
        let mut nodes = FxHashMap::default();
        nodes.insert(0, MockNode::default());
        Self { nodes, next_id: 1 }
    }

    /// Append a new element under `parent`.
    pub(crate) fn element(&mut self, parent: usize, attributes: &[(&str, &str)]) -> usize {
        let id = self.allocate(MockNode {
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..MockNode::default()
        });
        self.append_child(parent, id);
        id
    }

    fn allocate(&mut self, node: MockNode) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }
}

impl Document for MockDocument {
    type Node = usize;

    fn parent(&self, node: usize) -> Option<usize> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: usize) -> Vec<usize> {
        self.nodes.get(&node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn descendants(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    fn attribute(&self, node: usize, name: &str) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| {
            n.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        })
    }

    fn set_attribute(&mut self, node: usize, name: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            match n.attributes.iter_mut().find(|(key, _)| key == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => n.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn clone_subtree(&mut self, node: usize) -> usize {
        let Some(source) = self.nodes.get(&node).cloned() else {
            return self.allocate(MockNode::default());
        };
        let copy = self.allocate(MockNode {
            parent: None,
            children: Vec::new(),
            ..source.clone()
        });
        for child in source.children {
            let child_copy = self.clone_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    fn append_child(&mut self, parent: usize, child: usize) {
        if let Some(n) = self.nodes.get_mut(&child) {
            n.parent = Some(parent);
        }
        if let Some(n) = self.nodes.get_mut(&parent) {
            n.children.push(child);
        }
    }

    fn remove(&mut self, node: usize) {
        if let Some(parent) = self.parent(node) {
            if let Some(n) = self.nodes.get_mut(&parent) {
                n.children.retain(|&child| child != node);
            }
        }
        let mut doomed = self.descendants(node);
        doomed.push(node);
        for gone in doomed {
            self.nodes.remove(&gone);
        }
    }

    fn control_kind(&self, node: usize) -> ControlKind {
        match self.attribute(node, "type") {
            Some("text") => ControlKind::Text,
            Some("checkbox") => ControlKind::Checkbox,
            _ => ControlKind::Generic,
        }
    }

    fn text_value(&self, node: usize) -> String {
        self.nodes.get(&node).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_text_value(&mut self, node: usize, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.value = value.to_string();
        }
    }

    fn checked(&self, node: usize) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.checked)
    }

    fn set_checked(&mut self, node: usize, checked: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.checked = checked;
        }
    }

    fn selected_value(&self, _node: usize) -> Option<String> {
        None
    }

    fn select_value(&mut self, _node: usize, _value: &str) -> bool {
        false
    }

    fn content(&self, node: usize) -> String {
        let mut out = self.nodes.get(&node).map(|n| n.text.clone()).unwrap_or_default();
        for child in self.children(node) {
            out.push_str(&self.content(child));
        }
        out
    }

    fn set_content(&mut self, node: usize, content: &str) {
        for child in self.children(node) {
            self.remove(child);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = content.to_string();
        }
    }
}
