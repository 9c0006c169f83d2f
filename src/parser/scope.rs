//! Lexical scoping of defining labels.
//!
//! Each name has its own stack of bindings. Entering a cut pushes nothing;
//! a defining occurrence pushes a binding tagged with the current context,
//! and closing the cut pops exactly the bindings made in it. A bound
//! occurrence resolves to the top of its name's stack, i.e. the innermost
//! enclosing definition.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;
use tracing::trace;

use crate::base::{ContextId, VertexId};

/// A defining occurrence in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub context: ContextId,
    pub vertex: VertexId,
    /// Range of the `*name` token
    pub range: TextRange,
}

/// Shadow stacks for every name seen so far.
#[derive(Debug, Default)]
pub struct ScopeStack {
    shadows: FxHashMap<SmolStr, Vec<Binding>>,
    declared_in: FxHashMap<ContextId, Vec<SmolStr>>,
    /// Last binding popped per name, kept to tell "out of scope" from
    /// "never defined"
    retired: FxHashMap<SmolStr, Binding>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost binding of `name` currently in scope.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.shadows.get(name).and_then(|stack| stack.last()).copied()
    }

    /// The binding of `name` made directly in `context`, if any.
    pub fn binding_in(&self, name: &str, context: ContextId) -> Option<Binding> {
        self.lookup(name).filter(|b| b.context == context)
    }

    pub fn push(&mut self, name: SmolStr, binding: Binding) {
        trace!(name = %name, context = %binding.context, vertex = %binding.vertex, "bind");
        self.declared_in
            .entry(binding.context)
            .or_default()
            .push(name.clone());
        self.shadows.entry(name).or_default().push(binding);
    }

    /// Pop every binding made directly in `context`.
    pub fn exit(&mut self, context: ContextId) {
        let Some(names) = self.declared_in.remove(&context) else {
            return;
        };
        for name in names {
            let Some(stack) = self.shadows.get_mut(&name) else {
                continue;
            };
            if let Some(binding) = stack.pop() {
                trace!(name = %name, context = %context, "unbind");
                self.retired.insert(name.clone(), binding);
            }
            if stack.is_empty() {
                self.shadows.remove(&name);
            }
        }
    }

    /// The most recently closed binding of a name that is no longer in scope.
    pub fn retired(&self, name: &str) -> Option<Binding> {
        if self.lookup(name).is_some() {
            return None;
        }
        self.retired.get(name).copied()
    }
}
