//! Atelier - The binding workshop for Liant.
//!
//! Two-way binding between a JSON data root and a tree of UI elements, driven by
//! annotations carried on the elements themselves.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Binding                           │
//! │      (owns data, options, plugins, change set)           │
//! └─────────────────────────────────────────────────────────┘
//!                           │ init / write / read / event
//!         ┌─────────────────┴─────────────────┐
//!         ▼                                   ▼
//! ┌───────────────┐                   ┌───────────────┐
//! │  EachPlugin   │                   │  BindPlugin   │
//! │ (lists, drift │                   │ (element I/O, │
//! │  templates)   │                   │  propagation) │
//! └───────────────┘                   └───────────────┘
//!         │                                   │
//!         └─────────────────┬─────────────────┘
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          Document (host element tree) + Path             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Annotations
//!
//! - `data-bind="[facet:]path"` binds an element facet to a data path
//! - `data-each="path"` repeats the element's first child once per sequence item
//!
//! Attribute names are configurable through [`BindOptions`].

pub mod adapter;
pub mod annotation;
pub mod bind;
pub mod changes;
pub mod document;
pub mod each;
pub mod error;
pub mod instance;
pub mod options;
pub mod path;
pub mod plugin;
pub mod signal;

#[cfg(test)]
mod testing;

pub use adapter::{coerce_like, display_string, is_checked, ElementIo};
pub use annotation::{BindingAnnotation, ElementBinding, Facet};
pub use bind::BindPlugin;
pub use changes::{Change, ChangeSet, Changed, NotifyMode};
pub use document::{ControlKind, Document, UiEvent};
pub use each::EachPlugin;
pub use error::{BindError, BindResult};
pub use instance::{bind, bind_with_plugins, Binding};
pub use options::{
    BindOptions, PluginKind, DEFAULT_BIND_ATTRIBUTE, DEFAULT_EACH_ATTRIBUTE, DEFAULT_EVENTS,
    READ_EVENT,
};
pub use path::{Path, PathDialect};
pub use plugin::{BindingContext, BindingPlugin, EventOutcome};
pub use signal::{Emitter, Lifecycle, SubscriptionId};

/// Atelier version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
