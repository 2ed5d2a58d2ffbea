//! The binding engine's view of an element tree.
//!
//! Operations on unknown IDs are no-ops, and queries on them come back empty.
//! Mutations that the tree refuses are logged at `warn`.

use liant_atelier::{ControlKind, Document};
use tracing::warn;

use super::node::{ElementNode, NodeId, NodeKind};
use super::tree::ElementTree;

impl Document for ElementTree {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|n| n.children.to_vec())
            .unwrap_or_default()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.walk_preorder(node).skip(1).map(|n| n.id).collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|n| n.attributes.get(name))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.get_mut(node) {
            n.attributes.set(name, value);
        }
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        match self.deep_clone(node) {
            Ok(copy) => copy,
            // Cloning a dead handle yields a fresh, empty detached element
            Err(_) => {
                let id = self.next_id();
                self.insert(ElementNode::container(id, "div"))
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Err(err) = self.attach(parent, child) {
            warn!(parent, child, error = %err, "append_child ignored");
        }
    }

    fn remove(&mut self, node: NodeId) {
        ElementTree::remove(self, node);
    }

    fn control_kind(&self, node: NodeId) -> ControlKind {
        match self.get(node).map(|n| &n.kind) {
            Some(NodeKind::Input(_)) => ControlKind::Text,
            Some(NodeKind::Checkbox(_)) => ControlKind::Checkbox,
            Some(NodeKind::Select(_)) => ControlKind::Select,
            Some(NodeKind::Box) | None => ControlKind::Generic,
        }
    }

    fn text_value(&self, node: NodeId) -> String {
        match self.get(node).map(|n| &n.kind) {
            Some(NodeKind::Input(input)) => input.value.to_string(),
            _ => String::new(),
        }
    }

    fn set_text_value(&mut self, node: NodeId, value: &str) {
        if let Some(NodeKind::Input(input)) = self.get_mut(node).map(|n| &mut n.kind) {
            input.value = value.into();
        }
    }

    fn checked(&self, node: NodeId) -> bool {
        matches!(
            self.get(node).map(|n| &n.kind),
            Some(NodeKind::Checkbox(checkbox)) if checkbox.checked
        )
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(NodeKind::Checkbox(checkbox)) = self.get_mut(node).map(|n| &mut n.kind) {
            checkbox.checked = checked;
        }
    }

    fn selected_value(&self, node: NodeId) -> Option<String> {
        match self.get(node).map(|n| &n.kind) {
            Some(NodeKind::Select(select)) => select.selected_value().map(str::to_string),
            _ => None,
        }
    }

    fn select_value(&mut self, node: NodeId, value: &str) -> bool {
        match self.get_mut(node).map(|n| &mut n.kind) {
            Some(NodeKind::Select(select)) => select.select(value),
            _ => false,
        }
    }

    fn content(&self, node: NodeId) -> String {
        self.text_content(node)
    }

    fn set_content(&mut self, node: NodeId, content: &str) {
        if let Err(err) = self.replace_text(node, content) {
            warn!(node, error = %err, "set_content ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use liant_atelier::{ControlKind, Document};

    use crate::component::{BoxNode, CheckboxNode, InputNode, SelectNode, TextNode};
    use crate::render::ElementTree;

    #[test]
    fn test_control_kinds() {
        let mut tree = ElementTree::new();
        let root = tree.mount_root(BoxNode::new("form"));
        let input = tree.mount(root, InputNode::new()).unwrap();
        let check = tree.mount(root, CheckboxNode::new()).unwrap();
        let select = tree.mount(root, SelectNode::new().option("a")).unwrap();
        let text = tree.mount(root, TextNode::new("span", "hi")).unwrap();

        assert_eq!(tree.control_kind(input), ControlKind::Text);
        assert_eq!(tree.control_kind(check), ControlKind::Checkbox);
        assert_eq!(tree.control_kind(select), ControlKind::Select);
        assert_eq!(tree.control_kind(text), ControlKind::Generic);
    }

    #[test]
    fn test_values() {
        let mut tree = ElementTree::new();
        let root = tree.mount_root(BoxNode::new("form"));
        let input = tree.mount(root, InputNode::new().value("a")).unwrap();
        let check = tree.mount(root, CheckboxNode::new()).unwrap();
        let select = tree
            .mount(root, SelectNode::new().option("red").option("blue"))
            .unwrap();

        tree.set_text_value(input, "b");
        tree.set_checked(check, true);
        assert!(tree.select_value(select, "blue"));
        assert!(!tree.select_value(select, "green"));

        assert_eq!(tree.text_value(input), "b");
        assert!(tree.checked(check));
        assert_eq!(tree.selected_value(select).as_deref(), Some("blue"));
    }

    #[test]
    fn test_dead_handles_are_inert() {
        let mut tree = ElementTree::new();
        let root = tree.mount_root(BoxNode::new("div"));
        let gone = tree.mount(root, BoxNode::new("p")).unwrap();
        Document::remove(&mut tree, gone);

        assert_eq!(tree.parent(gone), None);
        assert!(tree.children(gone).is_empty());
        assert!(!tree.contains(root, gone));
        tree.set_attribute(gone, "title", "x");
        assert_eq!(tree.attribute(gone, "title"), None);
    }

    #[test]
    fn test_refused_mutations_leave_tree_intact() {
        let mut tree = ElementTree::new();
        let root = tree.mount_root(BoxNode::new("div"));
        let inner = tree.mount(root, TextNode::new("p", "x")).unwrap();

        // Appending an ancestor under its descendant would form a cycle
        tree.append_child(inner, root);
        tree.set_content(99, "ghost");

        assert_eq!(tree.parent(inner), Some(root));
        assert!(tree.children(inner).is_empty());
        assert_eq!(tree.content(root), "x");
    }

    #[test]
    fn test_clone_and_append() {
        let mut tree = ElementTree::new();
        let root = tree.mount_root(BoxNode::new("ul"));
        let item = tree
            .mount(root, TextNode::new("li", "x").bind(":/list/0"))
            .unwrap();

        let copy = tree.clone_subtree(item);
        assert_eq!(tree.parent(copy), None);
        tree.append_child(root, copy);

        assert_eq!(tree.children(root), vec![item, copy]);
        assert_eq!(tree.attribute(copy, "data-bind"), Some(":/list/0"));
        assert_eq!(tree.depth(copy), 1);
        assert_eq!(tree.content(root), "xx");
    }
}
