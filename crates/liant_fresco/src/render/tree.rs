//! Element tree management.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use super::node::{ElementNode, NodeId, NodeKind};
use crate::component::Component;
use crate::error::{TreeError, TreeResult};

/// A tree of element nodes.
///
/// Node IDs are never reused, so a handle to a removed node stays dead.
#[derive(Debug)]
pub struct ElementTree {
    /// All nodes by ID, attached or not
    nodes: FxHashMap<NodeId, ElementNode>,
    /// Root node ID
    root: Option<NodeId>,
    /// Next available node ID
    next_id: NodeId,
}

impl ElementTree {
    /// Create a new element tree.
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            root: None,
            next_id: 0,
        }
    }

    /// Allocate a new node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a node into the tree, detached.
    pub fn insert(&mut self, node: ElementNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Insert a node as root.
    pub fn insert_root(&mut self, node: ElementNode) -> NodeId {
        let id = self.insert(node);
        self.root = Some(id);
        id
    }

    /// Build `component` and make it the root.
    pub fn mount_root(&mut self, component: impl Component) -> NodeId {
        let id = self.next_id();
        self.insert_root(component.build(id))
    }

    /// Build `component` and append it under `parent`.
    pub fn mount(&mut self, parent: NodeId, component: impl Component) -> TreeResult<NodeId> {
        self.node(parent)?;
        let id = self.next_id();
        self.insert(component.build(id));
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Get the root node ID.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        self.nodes.get_mut(&id)
    }

    /// Get a node by ID, or fail.
    pub fn node(&self, id: NodeId) -> TreeResult<&ElementNode> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut ElementNode> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode(id))
    }

    /// Append a detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let len = self.node(parent)?.children.len();
        self.attach_at(parent, len, child)
    }

    /// Insert a detached node among the children of `parent` at `index`.
    ///
    /// An index past the end appends.
    pub fn attach_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> TreeResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) || parent == child {
            return Err(TreeError::WouldCycle { parent, child });
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it and its subtree alive.
    pub fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(&id).and_then(|node| node.parent.take());
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.remove_child(id);
        }
    }

    /// Remove a node and all its descendants.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        for node_id in self.collect_subtree(id) {
            self.nodes.remove(&node_id);
        }
        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Deep-copy a node and its subtree. The copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let source = self.node(id)?.clone();
        let copy_id = self.next_id();
        let mut copy = source.clone();
        copy.id = copy_id;
        copy.parent = None;
        copy.children.clear();
        self.insert(copy);

        for child in source.children {
            let child_copy = self.deep_clone(child)?;
            self.attach(copy_id, child_copy)?;
        }
        Ok(copy_id)
    }

    /// Replace the subtree of `id` with plain text.
    pub fn replace_text(&mut self, id: NodeId, text: &str) -> TreeResult<()> {
        let children = self.node(id)?.children.clone();
        for child in children {
            self.remove(child);
        }
        self.node_mut(id)?.text = text.into();
        Ok(())
    }

    /// Concatenated text of `id` and its subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_preorder(id)
            .map(|node| node.text.as_str())
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(|node| node.parent), |&current| {
            self.get(current).and_then(|node| node.parent)
        })
    }

    /// First node in document order whose `name` attribute equals `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        let root = self.root?;
        self.walk_preorder(root)
            .find(|node| node.attributes.get(name) == Some(value))
            .map(|node| node.id)
    }

    /// Get node count, including detached nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Clear the entire tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Walk the tree depth-first, pre-order.
    pub fn walk_preorder(&self, start: NodeId) -> TreeWalker<'_> {
        TreeWalker::new(self, start)
    }

    /// Indented text rendering of the subtree under `id`, one element per line.
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.outline_into(id, 0, &mut out);
        out
    }

    fn outline_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };

        if !out.is_empty() {
            out.push('\n');
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&node.tag);
        for (name, value) in node.attributes.iter() {
            let _ = write!(out, " {name}={value:?}");
        }
        match &node.kind {
            NodeKind::Box => {}
            NodeKind::Input(input) => {
                let _ = write!(out, " [{:?}]", input.value.as_str());
            }
            NodeKind::Checkbox(checkbox) => {
                out.push_str(if checkbox.checked { " [x]" } else { " [ ]" });
            }
            NodeKind::Select(select) => match select.selected_value() {
                Some(value) => {
                    let _ = write!(out, " [{value:?}]");
                }
                None => out.push_str(" [-]"),
            },
        }
        if !node.text.is_empty() {
            let _ = write!(out, " {:?}", node.text.as_str());
        }

        for &child in &node.children {
            self.outline_into(child, depth + 1, out);
        }
    }

    /// Collect a node and all its descendants.
    fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = vec![id];
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                for &child_id in &node.children {
                    result.push(child_id);
                    stack.push(child_id);
                }
            }
        }

        result
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator for tree traversal.
pub struct TreeWalker<'a> {
    tree: &'a ElementTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeWalker<'a> {
    fn new(tree: &'a ElementTree, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.get(id) {
                // Push children in reverse order so they're processed left-to-right
                for &child_id in node.children.iter().rev() {
                    self.stack.push(child_id);
                }
                return Some(node);
            }
        }
        None
    }
}
