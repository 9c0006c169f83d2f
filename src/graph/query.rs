//! Read-only views and queries.
//!
//! These are the operations layout and rendering code consume; none of them
//! changes the graph.

use indexmap::IndexSet;

use super::{Graph, GraphError, Vertex};
use crate::base::{ContextId, CutId, EdgeId, ElementId, SHEET_RAW_ID, VertexId};

impl Graph {
    // ========================================================================
    // Views
    // ========================================================================

    /// The sheet of assertion.
    pub fn sheet(&self) -> ContextId {
        ContextId::Sheet
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn cuts(&self) -> impl Iterator<Item = CutId> + '_ {
        self.cuts.iter().copied()
    }

    /// The sheet followed by every cut.
    pub fn contexts(&self) -> impl Iterator<Item = ContextId> + '_ {
        std::iter::once(ContextId::Sheet).chain(self.cuts().map(ContextId::Cut))
    }

    /// The ordered argument tuple of an edge.
    pub fn nu(&self, edge: EdgeId) -> Option<&[VertexId]> {
        self.nu.get(&edge).map(|args| &args[..])
    }

    pub fn relation_name(&self, edge: EdgeId) -> Option<&str> {
        self.relation_names.get(&edge).map(|name| name.as_str())
    }

    /// Every context with its direct contents.
    pub fn areas(&self) -> impl Iterator<Item = (ContextId, &IndexSet<ElementId>)> + '_ {
        self.area.iter().map(|(ctx, elements)| (*ctx, &**elements))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }

    /// True for the empty graph (nothing on the sheet).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.cuts.is_empty()
    }

    // ========================================================================
    // Element lookup
    // ========================================================================

    /// Resolve a raw id to its element kind.
    pub fn element(&self, raw: u32) -> Option<ElementId> {
        if self.vertices.contains_key(&VertexId::new(raw)) {
            Some(ElementId::Vertex(VertexId::new(raw)))
        } else if self.edges.contains(&EdgeId::new(raw)) {
            Some(ElementId::Edge(EdgeId::new(raw)))
        } else if self.cuts.contains(&CutId::new(raw)) {
            Some(ElementId::Cut(CutId::new(raw)))
        } else {
            None
        }
    }

    /// Resolve a raw id to a context: the sheet's id or a cut's id.
    pub fn context(&self, raw: u32) -> Option<ContextId> {
        if raw == SHEET_RAW_ID {
            Some(ContextId::Sheet)
        } else {
            self.element(raw)
                .and_then(|e| e.as_cut())
                .map(ContextId::Cut)
        }
    }

    pub fn contains_element(&self, element: ElementId) -> bool {
        match element {
            ElementId::Vertex(v) => self.vertices.contains_key(&v),
            ElementId::Edge(e) => self.edges.contains(&e),
            ElementId::Cut(c) => self.cuts.contains(&c),
        }
    }

    pub fn contains_context(&self, ctx: ContextId) -> bool {
        match ctx {
            ContextId::Sheet => true,
            ContextId::Cut(cut) => self.cuts.contains(&cut),
        }
    }

    /// Edges whose ν mentions `vertex`, in insertion order.
    pub fn edges_using(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.nu
            .iter()
            .filter(|(_, args)| args.contains(&vertex))
            .map(|(edge, _)| *edge)
            .collect()
    }

    // ========================================================================
    // Containment
    // ========================================================================

    /// Direct contents of a context.
    pub fn area_of(&self, ctx: ContextId) -> Result<&IndexSet<ElementId>, GraphError> {
        self.area
            .get(&ctx)
            .map(|elements| &**elements)
            .ok_or(GraphError::UnknownContext(ctx))
    }

    /// Recursive contents of a context: its area plus the areas of every cut
    /// nested in it.
    pub fn full_context_of(&self, ctx: ContextId) -> Result<IndexSet<ElementId>, GraphError> {
        let mut result = IndexSet::new();
        let mut pending = vec![ctx];
        while let Some(current) = pending.pop() {
            for element in self.area_of(current)?.iter() {
                // Each area is visited once: a cut is pushed only when first seen
                if result.insert(*element) {
                    if let ElementId::Cut(cut) = element {
                        pending.push(ContextId::Cut(*cut));
                    }
                }
            }
        }
        Ok(result)
    }

    /// The context whose area directly contains `element`.
    pub fn parent_context_of(&self, element: ElementId) -> Result<ContextId, GraphError> {
        if !self.contains_element(element) {
            return Err(GraphError::UnknownElement(element));
        }
        self.area
            .iter()
            .find(|(_, elements)| elements.contains(&element))
            .map(|(ctx, _)| *ctx)
            .ok_or(GraphError::UnknownElement(element))
    }

    /// Number of cuts enclosing the area of `ctx`: 0 for the sheet, and for
    /// a cut one more than the cut's own nesting depth.
    pub fn context_depth(&self, ctx: ContextId) -> Result<usize, GraphError> {
        let mut depth = 0;
        let mut current = ctx;
        while let ContextId::Cut(cut) = current {
            if depth > self.cuts.len() {
                return Err(GraphError::CyclicContainment { cut });
            }
            current = self.parent_context_of(ElementId::Cut(cut))?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Number of cuts strictly enclosing `element`.
    pub fn nesting_depth(&self, element: ElementId) -> Result<usize, GraphError> {
        let parent = self.parent_context_of(element)?;
        self.context_depth(parent)
    }

    /// Even depth (including the sheet) is positive, odd depth is negative.
    pub fn is_positive_context(&self, ctx: ContextId) -> Result<bool, GraphError> {
        if !self.contains_context(ctx) {
            return Err(GraphError::UnknownContext(ctx));
        }
        Ok(self.context_depth(ctx)? % 2 == 0)
    }

    /// Reflexive: is `inner` equal to `outer` or nested somewhere inside it?
    pub fn is_enclosed_by(&self, inner: ContextId, outer: ContextId) -> Result<bool, GraphError> {
        if !self.contains_context(outer) {
            return Err(GraphError::UnknownContext(outer));
        }
        if !self.contains_context(inner) {
            return Err(GraphError::UnknownContext(inner));
        }
        let mut current = inner;
        loop {
            if current == outer {
                return Ok(true);
            }
            match current {
                ContextId::Sheet => return Ok(false),
                ContextId::Cut(cut) => current = self.parent_context_of(ElementId::Cut(cut))?,
            }
        }
    }
}
