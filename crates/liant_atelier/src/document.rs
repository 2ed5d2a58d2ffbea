//! The document capability the engine binds against.
//!
//! The engine never owns a document. Hosts implement [`Document`] for their own
//! element tree and pass it into every operation, so the engine stays free of any
//! rendering or event-loop concerns.

use std::fmt;
use std::hash::Hash;

use liant_carton::CompactString;

/// How an element's primary value is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Single or multi-line text entry
    Text,
    /// Boolean toggle
    Checkbox,
    /// Choice among named options
    Select,
    /// Anything else; its value lives in the `value` attribute
    Generic,
}

/// A user-interface event delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent<N> {
    pub name: CompactString,
    pub target: N,
}

impl<N> UiEvent<N> {
    pub fn new(name: impl Into<CompactString>, target: N) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// An element tree the engine can query and mutate.
///
/// Element order is document order: [`Document::children`] returns children in
/// order and [`Document::descendants`] walks in pre-order. Queries on a node that
/// no longer exists return empty results rather than panicking.
pub trait Document {
    /// Handle to an element. Handles stay valid until the element is removed.
    type Node: Copy + Eq + Hash + fmt::Debug + 'static;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// All descendants of `node` in pre-order, excluding `node` itself.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Deep-copy `node` and its subtree. The copy is detached.
    fn clone_subtree(&mut self, node: Self::Node) -> Self::Node;

    /// Attach a detached `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detach `node` and destroy it together with its subtree.
    fn remove(&mut self, node: Self::Node);

    fn control_kind(&self, node: Self::Node) -> ControlKind;

    /// Current text of a text-entry control.
    fn text_value(&self, node: Self::Node) -> String;

    fn set_text_value(&mut self, node: Self::Node, value: &str);

    fn checked(&self, node: Self::Node) -> bool;

    fn set_checked(&mut self, node: Self::Node, checked: bool);

    /// Value of the selected option of a select control.
    fn selected_value(&self, node: Self::Node) -> Option<String>;

    /// Select the option whose value is `value`. Returns whether one matched.
    fn select_value(&mut self, node: Self::Node, value: &str) -> bool;

    /// Concatenated text of `node` and its subtree.
    fn content(&self, node: Self::Node) -> String;

    /// Replace the subtree of `node` with plain text.
    fn set_content(&mut self, node: Self::Node, content: &str);

    #[inline]
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Number of ancestors above `node`.
    fn depth(&self, node: Self::Node) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }
}
