//! Element builders.
//!
//! Provides the building blocks for bound documents:
//! - BoxNode: Container element
//! - TextNode: Element holding text
//! - InputNode: Text entry
//! - CheckboxNode: Boolean toggle
//! - SelectNode: Choice among options

mod box_node;
mod checkbox_node;
mod input_node;
mod select_node;
mod text_node;

pub use box_node::BoxNode;
pub use checkbox_node::CheckboxNode;
pub use input_node::InputNode;
pub use select_node::SelectNode;
pub use text_node::TextNode;

use crate::render::{ElementNode, NodeId};

/// Something that can be built into an element node.
pub trait Component {
    /// Build into an ElementNode with the given ID.
    fn build(self, id: NodeId) -> ElementNode;
}
