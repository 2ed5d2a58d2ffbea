//! Change propagation between bound elements and the data root.

use std::fmt;
use std::hash::Hash;

use liant_carton::{CompactString, FxHashMap, FxHashSet, SmallVec};
use serde_json::Value;
use tracing::{debug, trace};

use crate::adapter::{coerce_like, ElementIo};
use crate::annotation::ElementBinding;
use crate::document::{Document, UiEvent};
use crate::error::BindResult;
use crate::options::BindOptions;
use crate::path::{self, Path};
use crate::plugin::{BindingContext, BindingPlugin, EventOutcome};

/// Bound elements grouped by path, in document order within each group.
type BoundIndex<N> = FxHashMap<Path, SmallVec<[ElementBinding<N>; 2]>>;

/// Keeps bound elements, and the data behind them, in agreement.
#[derive(Debug)]
pub struct BindPlugin<N> {
    io: ElementIo<N>,
    events: FxHashSet<CompactString>,
}

impl<N: Copy + Eq + Hash> Default for BindPlugin<N> {
    fn default() -> Self {
        Self {
            io: ElementIo::new(),
            events: FxHashSet::default(),
        }
    }
}

impl<D: Document> BindingPlugin<D> for BindPlugin<D::Node> {
    fn name(&self) -> &'static str {
        "bind"
    }

    fn init(&mut self, cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        self.events = cx
            .options
            .events
            .iter()
            .map(|name| CompactString::from(name.as_str()))
            .collect();
        debug!(events = ?cx.options.events, "listening for ui events");
        Ok(())
    }

    fn write(&mut self, cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        let index = self.collect(cx)?;

        let live: FxHashSet<D::Node> = index
            .values()
            .flat_map(|group| group.iter().map(|binding| binding.element))
            .collect();
        self.io.retain(|element| live.contains(element));

        let mut written = 0usize;
        for (path, value) in path::flatten(cx.data) {
            let Some(group) = index.get(&path) else {
                continue;
            };
            for binding in group {
                if self.io.displays(&*cx.document, binding.element, &binding.facet, value) {
                    continue;
                }
                trace!(element = ?binding.element, path = %path, "writing bound element");
                self.io.write(cx.document, binding.element, &binding.facet, value);
                written += 1;
            }
        }

        debug!(bound = live.len(), written, "write cycle finished");
        Ok(())
    }

    fn read(&mut self, cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        let options = cx.options;
        for element in cx.annotated(&options.bind_attribute) {
            let binding = binding_of(cx, element)?;
            let shown = self.io.read(&*cx.document, element, &binding.facet);

            let current = path::get(cx.data, &binding.path);
            if current.is_none() && is_blank(&shown) {
                continue;
            }

            let value = settle(options, shown, current);
            cx.add_change(&binding.path, value)?;
        }
        Ok(())
    }

    fn event(
        &mut self,
        cx: &mut BindingContext<'_, D>,
        event: &UiEvent<D::Node>,
    ) -> BindResult<EventOutcome> {
        let options = cx.options;
        if !self.events.contains(event.name.as_str())
            || !cx.in_scope(event.target)
            || !cx.document.has_attribute(event.target, &options.bind_attribute)
        {
            return Ok(EventOutcome::Ignored);
        }

        let source = binding_of(cx, event.target)?;
        let shown = self.io.read(&*cx.document, source.element, &source.facet);
        let value = settle(options, shown, path::get(cx.data, &source.path));
        trace!(event = %event.name, path = %source.path, "propagating ui edit");

        self.write_peers(cx, &source, &value)?;
        cx.add_change(&source.path, value)?;
        Ok(EventOutcome::Handled)
    }
}

impl<N: Copy + Eq + Hash + fmt::Debug> BindPlugin<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every bound element in scope by path.
    fn collect<D>(&self, cx: &BindingContext<'_, D>) -> BindResult<BoundIndex<N>>
    where
        D: Document<Node = N>,
    {
        let options = cx.options;
        let mut index = BoundIndex::default();
        for element in cx.annotated(&options.bind_attribute) {
            let binding = binding_of(cx, element)?;
            index
                .entry(binding.path.clone())
                .or_insert_with(SmallVec::new)
                .push(binding);
        }
        Ok(index)
    }

    /// Show `value` on every other element bound to the source's path.
    fn write_peers<D>(
        &mut self,
        cx: &mut BindingContext<'_, D>,
        source: &ElementBinding<N>,
        value: &Value,
    ) -> BindResult<()>
    where
        D: Document<Node = N>,
    {
        let options = cx.options;
        for element in cx.annotated(&options.bind_attribute) {
            if element == source.element {
                continue;
            }
            let peer = binding_of(cx, element)?;
            if peer.path != source.path
                || self.io.displays(&*cx.document, element, &peer.facet, value)
            {
                continue;
            }
            self.io.write(cx.document, element, &peer.facet, value);
        }
        Ok(())
    }
}

fn binding_of<D: Document>(
    cx: &BindingContext<'_, D>,
    element: D::Node,
) -> BindResult<ElementBinding<D::Node>> {
    let options = cx.options;
    ElementBinding::of(&*cx.document, element, &options.bind_attribute, options.dialect)
}

/// The value to commit for what an element shows.
fn settle(options: &BindOptions, shown: Value, current: Option<&Value>) -> Value {
    if options.preserve_types {
        coerce_like(shown, current)
    } else {
        shown
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
