//! # Liant
//!
//! Two-way data binding between a JSON data root and a tree of UI elements.
//!
//! This crate re-exports all Liant sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`carton`] - Shared collections and reference token helpers
//! - [`atelier`] - The binding engine
//! - [`fresco`] - In-memory element tree
//!
//! ## Example
//!
//! ```
//! use liant::atelier::{bind, BindOptions};
//! use liant::fresco::{BoxNode, ElementTree, TextNode};
//! use serde_json::json;
//!
//! let mut tree = ElementTree::new();
//! let root = tree.mount_root(BoxNode::new("div"));
//! let list = tree.mount(root, BoxNode::new("ul").each("/users")).unwrap();
//! tree.mount(list, TextNode::new("li", "").bind(":/users/0/name")).unwrap();
//!
//! let data = json!({ "users": [{ "name": "x" }, { "name": "y" }] });
//! let binding = bind(&mut tree, root, data, BindOptions::default()).unwrap();
//!
//! assert_eq!(tree.text_content(list), "xy");
//! # drop(binding);
//! ```

/// Shared collections and reference token helpers.
pub use liant_carton as carton;

/// The binding engine: paths, annotations, lists and change propagation.
pub use liant_atelier as atelier;

/// In-memory element tree implementing the engine's document capability.
pub use liant_fresco as fresco;

pub use liant_atelier::{bind, BindError, BindOptions, BindResult, Binding, Changed};
