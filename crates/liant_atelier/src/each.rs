//! List reconciliation for repeat containers.
//!
//! A repeat container carries an `each` annotation naming a sequence in the data.
//! The first time a container is seen, a detached copy of its first child is kept
//! as the template for every list item. From then on:
//!
//! - on write, the container gets exactly one child per sequence item, by
//!   removing trailing children or appending copies of the template;
//! - on read, a reorder or removal of children performed by the user is detected
//!   first and committed into the data, reordering items to match.
//!
//! Either way every child's subtree is then rewritten so that annotations under
//! the sequence's path point at the child's own index, and each child is tagged
//! with that index so the next read can detect drift.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use liant_carton::{FxHashMap, FxHashSet};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::annotation::BindingAnnotation;
use crate::document::Document;
use crate::error::{BindError, BindResult};
use crate::options::BindOptions;
use crate::path::{self, Path};
use crate::plugin::{BindingContext, BindingPlugin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Write,
    Read,
}

/// Keeps repeat containers in step with the sequences they are bound to.
#[derive(Debug)]
pub struct EachPlugin<N> {
    /// Container to its detached template
    templates: FxHashMap<N, N>,
    /// List item to the index it was last rendered for
    indices: FxHashMap<N, usize>,
}

impl<N> Default for EachPlugin<N> {
    fn default() -> Self {
        Self {
            templates: FxHashMap::default(),
            indices: FxHashMap::default(),
        }
    }
}

impl<D: Document> BindingPlugin<D> for EachPlugin<D::Node> {
    fn name(&self) -> &'static str {
        "each"
    }

    fn write(&mut self, cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        self.reconcile(cx, Pass::Write)
    }

    fn read(&mut self, cx: &mut BindingContext<'_, D>) -> BindResult<()> {
        self.reconcile(cx, Pass::Read)
    }
}

impl<N: Copy + Eq + Hash + fmt::Debug> EachPlugin<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index tag of a list item, if it has been rendered.
    pub fn index_of(&self, item: N) -> Option<usize> {
        self.indices.get(&item).copied()
    }

    /// The template captured for a container.
    pub fn template_of(&self, container: N) -> Option<N> {
        self.templates.get(&container).copied()
    }

    fn reconcile<D>(&mut self, cx: &mut BindingContext<'_, D>, pass: Pass) -> BindResult<()>
    where
        D: Document<Node = N>,
    {
        let mut containers = cx.annotated(&cx.options.each_attribute);
        // Outer containers first, so their rewrites land before inner ones run
        containers.sort_by_cached_key(|&container| cx.document.depth(container));

        let mut queued: FxHashSet<N> = containers.iter().copied().collect();
        let mut queue: VecDeque<N> = containers.into();

        while let Some(container) = queue.pop_front() {
            // An outer container may have dropped this one while shrinking
            if !cx.in_scope(container) {
                continue;
            }
            for nested in self.reconcile_container(cx, container, pass)? {
                if queued.insert(nested) {
                    queue.push_back(nested);
                }
            }
        }

        self.prune(cx);
        Ok(())
    }

    /// Reconcile one container and return the repeat containers found in its items.
    fn reconcile_container<D>(
        &mut self,
        cx: &mut BindingContext<'_, D>,
        container: N,
        pass: Pass,
    ) -> BindResult<Vec<N>>
    where
        D: Document<Node = N>,
    {
        let options = cx.options;
        let Some(raw) = cx.document.attribute(container, &options.each_attribute) else {
            return Ok(Vec::new());
        };
        let path = Path::parse(options.dialect, raw)?;
        let template = self.capture_template(cx.document, container)?;

        // A null sequence shows no items, in either direction
        if matches!(path::get(cx.data, &path), Some(Value::Null)) {
            self.resize(cx.document, container, template, 0);
            return Ok(Vec::new());
        }

        if pass == Pass::Read && !self.commit_drift(cx, container, &path)? {
            return Ok(Vec::new());
        }

        let target = match path::get(cx.data, &path) {
            Some(Value::Array(items)) => items.len(),
            None => return Ok(Vec::new()),
            Some(other) => {
                warn!(
                    container = ?container,
                    path = %path,
                    found = json_kind(other),
                    "repeat container is bound to a non-sequence value"
                );
                return Ok(Vec::new());
            }
        };

        self.resize(cx.document, container, template, target);
        self.reindex(cx.document, options, container, &path)
    }

    fn capture_template<D>(&mut self, document: &mut D, container: N) -> BindResult<N>
    where
        D: Document<Node = N>,
    {
        if let Some(&template) = self.templates.get(&container) {
            return Ok(template);
        }

        let first = document
            .children(container)
            .first()
            .copied()
            .ok_or_else(|| BindError::TemplateMissing {
                container: format!("{container:?}"),
            })?;
        let template = document.clone_subtree(first);
        debug!(container = ?container, template = ?template, "captured list template");

        self.templates.insert(container, template);
        Ok(template)
    }

    /// Commit a user reorder or removal of list items into the data.
    ///
    /// Returns `false` when the container's path holds something other than a
    /// sequence, in which case the container is left alone.
    fn commit_drift<D>(
        &mut self,
        cx: &mut BindingContext<'_, D>,
        container: N,
        path: &Path,
    ) -> BindResult<bool>
    where
        D: Document<Node = N>,
    {
        let previous: &[Value] = match path::get(cx.data, path) {
            Some(Value::Array(items)) => items.as_slice(),
            None => &[],
            Some(_) => return Ok(false),
        };

        let children = cx.document.children(container);
        let mut drifted = children.len() != previous.len();
        let mut rebuilt = Vec::with_capacity(children.len());

        for (position, child) in children.iter().enumerate() {
            let item = match self.indices.get(child) {
                Some(&index) => {
                    drifted |= index != position;
                    previous.get(index).cloned()
                }
                None => {
                    drifted = true;
                    None
                }
            };
            rebuilt.push(item.unwrap_or_else(|| Value::Object(Map::new())));
        }

        if drifted || !path::has(cx.data, path) {
            debug!(
                container = ?container,
                path = %path,
                from = previous.len(),
                to = rebuilt.len(),
                "list items drifted from data"
            );
            cx.add_change(path, Value::Array(rebuilt))?;
        }
        Ok(true)
    }

    fn resize<D>(&mut self, document: &mut D, container: N, template: N, target: usize)
    where
        D: Document<Node = N>,
    {
        let mut children = document.children(container);
        let before = children.len();

        while children.len() > target {
            if let Some(last) = children.pop() {
                self.forget(document, last);
                document.remove(last);
            }
        }
        while children.len() < target {
            let item = document.clone_subtree(template);
            document.append_child(container, item);
            children.push(item);
        }

        if before != target {
            debug!(container = ?container, from = before, to = target, "resized list");
        }
    }

    /// Point every item's annotations at its index and tag it.
    fn reindex<D>(
        &mut self,
        document: &mut D,
        options: &BindOptions,
        container: N,
        path: &Path,
    ) -> BindResult<Vec<N>>
    where
        D: Document<Node = N>,
    {
        let mut nested = Vec::new();

        for (index, item) in document.children(container).into_iter().enumerate() {
            self.indices.insert(item, index);

            let mut subtree = vec![item];
            subtree.extend(document.descendants(item));

            for node in subtree {
                if let Some(raw) = document.attribute(node, &options.bind_attribute) {
                    let mut annotation = BindingAnnotation::parse(raw, options.dialect)?;
                    if let Some(rebased) = annotation.path.rebase_index(path, index) {
                        if rebased != annotation.path {
                            annotation.path = rebased;
                            let rendered = annotation.render(options.dialect);
                            document.set_attribute(node, &options.bind_attribute, &rendered);
                        }
                    }
                }

                if let Some(raw) = document.attribute(node, &options.each_attribute) {
                    let inner = Path::parse(options.dialect, raw)?;
                    if let Some(rebased) = inner.rebase_index(path, index) {
                        if rebased != inner {
                            let rendered = rebased.compile(options.dialect);
                            document.set_attribute(node, &options.each_attribute, &rendered);
                        }
                    }
                    nested.push(node);
                }
            }
        }

        Ok(nested)
    }

    /// Drop side-table entries for `node` and its subtree.
    fn forget<D>(&mut self, document: &mut D, node: N)
    where
        D: Document<Node = N>,
    {
        let mut doomed = document.descendants(node);
        doomed.push(node);
        for gone in doomed {
            self.indices.remove(&gone);
            if let Some(template) = self.templates.remove(&gone) {
                document.remove(template);
            }
        }
    }

    /// Drop side-table entries for elements no longer in scope.
    fn prune<D>(&mut self, cx: &mut BindingContext<'_, D>)
    where
        D: Document<Node = N>,
    {
        self.indices.retain(|&item, _| cx.in_scope(item));

        let stale: Vec<(N, N)> = self
            .templates
            .iter()
            .filter(|&(&container, _)| !cx.in_scope(container))
            .map(|(&container, &template)| (container, template))
            .collect();
        for (container, template) in stale {
            self.templates.remove(&container);
            cx.document.remove(template);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
