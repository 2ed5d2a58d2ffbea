//! Binding instances.

use serde_json::Value;
use tracing::{debug, info_span};

use crate::changes::{ChangeSet, Changed};
use crate::document::{Document, UiEvent};
use crate::error::BindResult;
use crate::options::{BindOptions, READ_EVENT};
use crate::plugin::{BindingContext, BindingPlugin, EventOutcome};
use crate::signal::{Emitter, Lifecycle, SubscriptionId};

/// Bind `data` to the subtree under `root`, using the plugins named in `options`.
///
/// The document is written from the data before this returns.
pub fn bind<D: Document>(
    document: &mut D,
    root: D::Node,
    data: Value,
    options: BindOptions,
) -> BindResult<Binding<D>> {
    let plugins = options.plugins.iter().map(|kind| kind.build()).collect();
    bind_with_plugins(document, root, data, options, plugins)
}

/// Bind with an explicit plugin list instead of the one in `options`.
pub fn bind_with_plugins<D: Document>(
    document: &mut D,
    root: D::Node,
    data: Value,
    options: BindOptions,
    plugins: Vec<Box<dyn BindingPlugin<D>>>,
) -> BindResult<Binding<D>> {
    let mut binding = Binding {
        root,
        data,
        options,
        plugins,
        changes: ChangeSet::new(),
        changed: Emitter::new(),
        lifecycle: Emitter::new(),
    };

    let _span = info_span!("bind", root = ?root).entered();
    debug!(
        plugins = ?binding.plugins.iter().map(|plugin| plugin.name()).collect::<Vec<_>>(),
        "binding instance"
    );

    binding.signal(document, Lifecycle::Init)?;
    binding.signal(document, Lifecycle::Write)?;
    binding.flush();
    Ok(binding)
}

/// A data root bound to one subtree of a document.
///
/// The instance owns its data. Each of [`Binding::to_document`],
/// [`Binding::from_document`] and [`Binding::handle_event`] notifies `changed`
/// subscribers at most once, and only if the data actually changed.
pub struct Binding<D: Document> {
    root: D::Node,
    data: Value,
    options: BindOptions,
    plugins: Vec<Box<dyn BindingPlugin<D>>>,
    changes: ChangeSet,
    changed: Emitter<Changed>,
    lifecycle: Emitter<Lifecycle>,
}

impl<D: Document> Binding<D> {
    #[inline]
    pub fn root(&self) -> D::Node {
        self.root
    }

    #[inline]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Mutable access to the data. Call [`Binding::to_document`] to show edits.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Value {
        &mut self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    #[inline]
    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Whether changes are committed but not yet notified.
    pub fn has_pending_changes(&self) -> bool {
        self.changes.is_dirty()
    }

    /// Push the data into the document, after replacing it with `data` if given.
    pub fn to_document(&mut self, document: &mut D, data: Option<Value>) -> BindResult<()> {
        if let Some(data) = data {
            self.data = data;
        }
        let _span = info_span!("to_document", root = ?self.root).entered();
        self.signal(document, Lifecycle::Write)?;
        self.flush();
        Ok(())
    }

    /// Pull document state into the data and return it.
    pub fn from_document(&mut self, document: &mut D) -> BindResult<&Value> {
        let _span = info_span!("from_document", root = ?self.root).entered();
        self.signal(document, Lifecycle::Read)?;
        self.flush();
        Ok(&self.data)
    }

    /// Deliver a UI event.
    ///
    /// A `read` event anywhere within the root runs a full read cycle. Other
    /// events go to each plugin in order.
    pub fn handle_event(
        &mut self,
        document: &mut D,
        event: &UiEvent<D::Node>,
    ) -> BindResult<EventOutcome> {
        if event.name == READ_EVENT
            && self.options.listens_to(READ_EVENT)
            && document.contains(self.root, event.target)
        {
            self.from_document(document)?;
            return Ok(EventOutcome::Handled);
        }

        let mut outcome = EventOutcome::Ignored;
        {
            let mut cx = BindingContext {
                document,
                root: self.root,
                data: &mut self.data,
                options: &self.options,
                changes: &mut self.changes,
            };
            for plugin in &mut self.plugins {
                if plugin.event(&mut cx, event)? == EventOutcome::Handled {
                    outcome = EventOutcome::Handled;
                }
            }
        }

        self.flush();
        Ok(outcome)
    }

    /// Subscribe to data change notifications.
    pub fn on_changed(&mut self, listener: impl FnMut(&Changed) + 'static) -> SubscriptionId {
        self.changed.subscribe(listener)
    }

    pub fn off_changed(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    /// Subscribe to lifecycle signals, delivered after every plugin has run.
    pub fn on_lifecycle(&mut self, listener: impl FnMut(&Lifecycle) + 'static) -> SubscriptionId {
        self.lifecycle.subscribe(listener)
    }

    pub fn off_lifecycle(&mut self, id: SubscriptionId) -> bool {
        self.lifecycle.unsubscribe(id)
    }

    fn signal(&mut self, document: &mut D, signal: Lifecycle) -> BindResult<()> {
        debug!(signal = %signal, "running plugins");
        let mut cx = BindingContext {
            document,
            root: self.root,
            data: &mut self.data,
            options: &self.options,
            changes: &mut self.changes,
        };
        for plugin in &mut self.plugins {
            match signal {
                Lifecycle::Init => plugin.init(&mut cx)?,
                Lifecycle::Write => plugin.write(&mut cx)?,
                Lifecycle::Read => plugin.read(&mut cx)?,
            }
        }
        self.lifecycle.emit(&signal);
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(changed) = self.changes.take(&self.data, self.options.notify) {
            debug!("notifying data change");
            self.changed.emit(&changed);
        }
    }
}

impl<D: Document> std::fmt::Debug for Binding<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("root", &self.root)
            .field("data", &self.data)
            .field("options", &self.options)
            .field(
                "plugins",
                &self.plugins.iter().map(|plugin| plugin.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::Change;
    use crate::testing::MockDocument;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_bind_writes_and_notifies_once_per_cycle() {
        let mut document = MockDocument::new();
        let input = document.element(0, &[("data-bind", "/name"), ("type", "text")]);

        let data = json!({"name": "a"});
        let mut binding = bind(&mut document, 0, data, BindOptions::default()).unwrap();
        assert_eq!(document.text_value(input), "a");

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        binding.on_changed(move |changed| sink.borrow_mut().push(changed.clone()));

        document.set_text_value(input, "b");
        binding.from_document(&mut document).unwrap();
        // Nothing left to change
        binding.from_document(&mut document).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![Changed::Paths(vec![Change {
                path: "/name".to_string(),
                value: json!("b"),
            }])]
        );
    }

    #[test]
    fn test_lifecycle_order() {
        let mut document = MockDocument::new();
        let mut binding = bind(&mut document, 0, json!({}), BindOptions::default()).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = binding.on_lifecycle(move |signal| sink.borrow_mut().push(*signal));

        binding.to_document(&mut document, None).unwrap();
        binding.from_document(&mut document).unwrap();
        assert!(binding.off_lifecycle(id));
        binding.to_document(&mut document, None).unwrap();

        assert_eq!(*seen.borrow(), vec![Lifecycle::Write, Lifecycle::Read]);
    }

    #[test]
    fn test_read_event_runs_read_cycle() {
        let mut document = MockDocument::new();
        let input = document.element(0, &[("data-bind", "/n"), ("type", "text")]);
        let mut binding = bind(&mut document, 0, json!({"n": 1}), BindOptions::default()).unwrap();

        document.set_text_value(input, "5");
        let outcome = binding
            .handle_event(&mut document, &UiEvent::new(READ_EVENT, 0))
            .unwrap();

        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(binding.data(), &json!({"n": 5}));
    }
}
