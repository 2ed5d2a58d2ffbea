//! The plugin seam of a binding instance.
//!
//! An instance owns an ordered list of [`BindingPlugin`]s. On every lifecycle
//! signal it hands each plugin, in order, a [`BindingContext`] borrowing the
//! document, the data root and the pending change set.

use serde_json::Value;

use crate::bind::BindPlugin;
use crate::changes::ChangeSet;
use crate::document::{Document, UiEvent};
use crate::each::EachPlugin;
use crate::error::BindResult;
use crate::options::{BindOptions, PluginKind};
use crate::path::Path;

/// Everything a plugin may touch during one signal.
pub struct BindingContext<'a, D: Document> {
    pub document: &'a mut D,
    /// The instance's scope root
    pub root: D::Node,
    pub data: &'a mut Value,
    pub options: &'a BindOptions,
    pub changes: &'a mut ChangeSet,
}

impl<D: Document> BindingContext<'_, D> {
    /// Commit `value` at `path` into the data.
    ///
    /// A no-op returning `false` when the instance does not update its data, or
    /// when the value is already there.
    pub fn add_change(&mut self, path: &Path, value: Value) -> BindResult<bool> {
        if !self.options.update_data {
            return Ok(false);
        }
        self.changes
            .add(self.data, path, value, self.options.dialect)
            .inspect(|changed| {
                if *changed {
                    tracing::trace!(path = %path, "committed change");
                }
            })
    }

    /// Elements under the root carrying `attribute`, in document order.
    ///
    /// The root itself is not part of its scope.
    pub fn annotated(&self, attribute: &str) -> Vec<D::Node> {
        self.document
            .descendants(self.root)
            .into_iter()
            .filter(|&node| self.document.has_attribute(node, attribute))
            .collect()
    }

    /// Whether `node` lies strictly beneath the root.
    pub fn in_scope(&self, node: D::Node) -> bool {
        node != self.root && self.document.contains(self.root, node)
    }
}

/// Whether a plugin consumed a UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Handled,
}

/// A unit of binding behavior driven by lifecycle signals.
pub trait BindingPlugin<D: Document> {
    fn name(&self) -> &'static str;

    /// Called once when the instance is created, before the first write.
    fn init(&mut self, _cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        Ok(())
    }

    /// Push data into the document.
    fn write(&mut self, _cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        Ok(())
    }

    /// Pull document state into the data.
    fn read(&mut self, _cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        Ok(())
    }

    fn event(
        &mut self,
        _cx: &mut BindingContext<'_, D>,
        _event: &UiEvent<D::Node>,
    ) -> BindResult<EventOutcome> {
        Ok(EventOutcome::Ignored)
    }
}

impl PluginKind {
    /// Instantiate the built-in plugin.
    pub fn build<D: Document>(self) -> Box<dyn BindingPlugin<D>> {
        match self {
            PluginKind::Each => Box::new(EachPlugin::new()),
            PluginKind::Bind => Box::new(BindPlugin::new()),
        }
    }
}
