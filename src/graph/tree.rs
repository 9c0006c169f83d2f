//! Context containment tree and least-common-ancestor placement.
//!
//! Built once per parse or generate pass from the graph's areas. Both the
//! parser's constant hoisting and the generator's anchoring of defining
//! occurrences go through [`ContextTree::lca`].

use rustc_hash::{FxHashMap, FxHashSet};

use super::Graph;
use crate::base::{ContextId, CutId, ElementId, VertexId};

/// Owning context of every element, and through it the parent links
/// between contexts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextTree {
    owners: FxHashMap<ElementId, ContextId>,
    parents: FxHashMap<CutId, ContextId>,
}

impl ContextTree {
    pub fn from_graph(graph: &Graph) -> Self {
        let mut owners = FxHashMap::default();
        let mut parents = FxHashMap::default();
        for (ctx, elements) in graph.area.iter() {
            for element in elements.iter() {
                owners.insert(*element, *ctx);
                if let ElementId::Cut(cut) = element {
                    parents.insert(*cut, *ctx);
                }
            }
        }
        Self { owners, parents }
    }

    /// The context whose area directly contains `element`.
    pub fn owner(&self, element: ElementId) -> Option<ContextId> {
        self.owners.get(&element).copied()
    }

    /// Whether `ctx` is the sheet or a cut known to this tree.
    pub fn contains(&self, ctx: ContextId) -> bool {
        match ctx {
            ContextId::Sheet => true,
            ContextId::Cut(cut) => self.parents.contains_key(&cut),
        }
    }

    /// The directly enclosing context. `None` for the sheet or an unknown cut.
    pub fn parent(&self, ctx: ContextId) -> Option<ContextId> {
        ctx.as_cut().and_then(|cut| self.parents.get(&cut).copied())
    }

    /// `ctx` followed by every enclosing context, ending at the sheet.
    ///
    /// An unknown cut yields just itself.
    pub fn ancestors(&self, ctx: ContextId) -> Vec<ContextId> {
        let mut chain = vec![ctx];
        let mut current = ctx;
        while let Some(parent) = self.parent(current) {
            // Guard against malformed input; a validated graph never loops
            if chain.len() > self.parents.len() + 1 {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Number of cuts enclosing the area of `ctx` (0 for the sheet).
    pub fn depth(&self, ctx: ContextId) -> usize {
        self.ancestors(ctx).len() - 1
    }

    /// Reflexive ancestor test: is `inner` equal to or nested inside `outer`?
    pub fn is_ancestor(&self, outer: ContextId, inner: ContextId) -> bool {
        self.ancestors(inner).contains(&outer)
    }

    /// The innermost context enclosing every context in `contexts`.
    ///
    /// Walks each context's chain to the sheet, intersects the chains and
    /// keeps the deepest common element. `None` when `contexts` is empty.
    pub fn lca(&self, contexts: impl IntoIterator<Item = ContextId>) -> Option<ContextId> {
        let mut contexts = contexts.into_iter();
        let first = contexts.next()?;
        let mut common = self.ancestors(first);
        for ctx in contexts {
            let chain: FxHashSet<ContextId> = self.ancestors(ctx).into_iter().collect();
            common.retain(|c| chain.contains(c));
        }
        // Chains are innermost-first, so the first survivor is the deepest
        common.first().copied().or(Some(ContextId::Sheet))
    }
}

impl Graph {
    /// Build the containment tree for this graph.
    pub fn context_tree(&self) -> ContextTree {
        ContextTree::from_graph(self)
    }

    /// Contexts in which `vertex` is used as a relation argument, one entry
    /// per using edge, in edge insertion order.
    pub fn use_contexts(&self, tree: &ContextTree, vertex: VertexId) -> Vec<ContextId> {
        self.edges_using(vertex)
            .into_iter()
            .filter_map(|edge| tree.owner(ElementId::Edge(edge)))
            .collect()
    }
}
