//! Element tree module.
//!
//! Provides the in-memory document:
//! - Node definitions
//! - Tree management and traversal
//! - The binding engine's document capability

mod document;
mod node;
mod tree;

pub use node::{
    Attributes, CheckboxContent, ElementNode, InputContent, NodeId, NodeKind, SelectContent,
    SelectOption,
};
pub use tree::{ElementTree, TreeWalker};
