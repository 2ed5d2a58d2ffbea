//! Fresco - In-memory element tree for Liant.
//!
//! A small document model that hosts bindings: elements with tags, attributes,
//! text and form-control state, arranged in a tree that implements
//! [`liant_atelier::Document`].
//!
//! # Example
//!
//! ```
//! use liant_atelier::{bind, BindOptions};
//! use liant_fresco::{BoxNode, ElementTree, InputNode};
//! use serde_json::json;
//!
//! let mut tree = ElementTree::new();
//! let form = tree.mount_root(BoxNode::new("form"));
//! let name = tree.mount(form, InputNode::new().bind("/name")).unwrap();
//!
//! let data = json!({ "name": "Ada" });
//! let mut binding = bind(&mut tree, form, data, BindOptions::default()).unwrap();
//!
//! let event = tree.type_text(name, "Grace").unwrap();
//! binding.handle_event(&mut tree, &event).unwrap();
//! assert_eq!(binding.data(), &json!({ "name": "Grace" }));
//! ```

pub mod component;
pub mod error;
pub mod input;
pub mod render;

// Re-exports for convenience
pub use component::{BoxNode, CheckboxNode, Component, InputNode, SelectNode, TextNode};
pub use error::{TreeError, TreeResult};
pub use input::{Edit, EventName};
pub use render::{
    Attributes, ElementNode, ElementTree, NodeId, NodeKind, SelectContent, SelectOption,
    TreeWalker,
};

/// Fresco version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
