//! Relational graph with cuts.
//!
//! This module implements Dau's "Relational Graph with Cuts" as a persistent
//! value. Every constructor takes `&self` and returns a new [`Graph`]; the
//! fields are reference-counted so unchanged parts are shared between the
//! old and the new value.
//!
//! ## Structure
//!
//! ```text
//! Graph
//! ├── vertices:       IndexMap<VertexId, Vertex>       (generic or constant)
//! ├── edges:          IndexSet<EdgeId>
//! ├── cuts:           IndexSet<CutId>
//! ├── nu:             IndexMap<EdgeId, [VertexId]>     (ordered arguments)
//! ├── relation_names: IndexMap<EdgeId, SmolStr>
//! └── area:           IndexMap<ContextId, IndexSet<ElementId>>
//! ```
//!
//! `area` is direct containment only; the recursive closure is the
//! "full context" (see [`Graph::full_context_of`]).
//!
//! Every constructor re-checks the six structural invariants (see
//! [`Graph::validate`]) before handing back the new value.

mod alphabet;
mod error;
mod query;
mod tree;
mod validate;


pub use alphabet::Alphabet;
pub use error::GraphError;
pub use tree::ContextTree;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::base::{ContextId, CutId, EdgeId, ElementId, SHEET_RAW_ID, VertexId};

// ============================================================================
// VERTICES
// ============================================================================

/// What a vertex denotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// "Something": an existentially quantified individual.
    Generic,
    /// A named individual such as `Socrates`.
    Constant(SmolStr),
}

/// A vertex of the graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub id: VertexId,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn generic(id: VertexId) -> Self {
        Self {
            id,
            kind: VertexKind::Generic,
        }
    }

    pub fn constant(id: VertexId, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            kind: VertexKind::Constant(name.into()),
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self.kind, VertexKind::Generic)
    }

    /// The constant's name, or `None` for a generic vertex.
    pub fn constant_name(&self) -> Option<&str> {
        match &self.kind {
            VertexKind::Generic => None,
            VertexKind::Constant(name) => Some(name.as_str()),
        }
    }
}

// ============================================================================
// RAW PARTS
// ============================================================================

/// Unchecked building blocks of a graph.
///
/// Sibling notations (and tests) assemble these directly and hand them to
/// [`Graph::from_parts`], which runs the same validation as every other
/// constructor. Lists rather than maps are used so that duplicated entries
/// are representable and can be reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphParts {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<EdgeId>,
    pub cuts: Vec<CutId>,
    pub nu: Vec<(EdgeId, Vec<VertexId>)>,
    pub relation_names: Vec<(EdgeId, SmolStr)>,
    pub area: Vec<(ContextId, Vec<ElementId>)>,
}

// ============================================================================
// GRAPH
// ============================================================================

type Area = Arc<IndexSet<ElementId>>;

/// An existential graph. Immutable: constructors return a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    vertices: Arc<IndexMap<VertexId, Vertex>>,
    edges: Arc<IndexSet<EdgeId>>,
    cuts: Arc<IndexSet<CutId>>,
    nu: Arc<IndexMap<EdgeId, Arc<[VertexId]>>>,
    relation_names: Arc<IndexMap<EdgeId, SmolStr>>,
    area: Arc<IndexMap<ContextId, Area>>,
    /// Smallest raw id not used by any element
    next_id: u32,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// The empty graph: only the sheet, with an empty area.
    pub fn new() -> Self {
        let mut area = IndexMap::new();
        area.insert(ContextId::Sheet, Area::default());
        Self {
            vertices: Arc::default(),
            edges: Arc::default(),
            cuts: Arc::default(),
            nu: Arc::default(),
            relation_names: Arc::default(),
            area: Arc::new(area),
            next_id: SHEET_RAW_ID + 1,
        }
    }

    /// Assemble a graph from raw parts, checking every invariant.
    pub fn from_parts(parts: GraphParts) -> Result<Self, GraphError> {
        let mut vertices = IndexMap::new();
        for vertex in parts.vertices {
            let raw = vertex.id.raw();
            if vertices.insert(vertex.id, vertex).is_some() {
                return Err(GraphError::DuplicateElement(raw));
            }
        }

        let mut edges = IndexSet::new();
        for edge in parts.edges {
            if !edges.insert(edge) {
                return Err(GraphError::DuplicateElement(edge.raw()));
            }
        }

        let mut cuts = IndexSet::new();
        for cut in parts.cuts {
            if !cuts.insert(cut) {
                return Err(GraphError::DuplicateElement(cut.raw()));
            }
        }

        let mut nu = IndexMap::new();
        for (edge, args) in parts.nu {
            if nu.insert(edge, Arc::from(args)).is_some() {
                return Err(GraphError::InvalidNu { edge, vertex: None });
            }
        }

        let mut relation_names = IndexMap::new();
        for (edge, name) in parts.relation_names {
            if relation_names.insert(edge, name).is_some() {
                return Err(GraphError::MissingRelationName { edge });
            }
        }

        let mut area: IndexMap<ContextId, Area> = IndexMap::new();
        for (context, elements) in parts.area {
            let mut set = IndexSet::new();
            for element in elements {
                if !set.insert(element) {
                    return Err(GraphError::AreaCoverage {
                        raw: element.raw(),
                        detail: "listed twice in one area",
                    });
                }
            }
            if area.insert(context, Arc::new(set)).is_some() {
                return Err(GraphError::AreaCoverage {
                    raw: context.raw(),
                    detail: "context has more than one area",
                });
            }
        }
        // The sheet always has an area, even when the caller left it out
        area.entry(ContextId::Sheet).or_default();

        let next_id = vertices
            .keys()
            .map(|v| v.raw())
            .chain(edges.iter().map(|e| e.raw()))
            .chain(cuts.iter().map(|c| c.raw()))
            .max()
            .map_or(SHEET_RAW_ID + 1, |max| max.saturating_add(1));

        let graph = Self {
            vertices: Arc::new(vertices),
            edges: Arc::new(edges),
            cuts: Arc::new(cuts),
            nu: Arc::new(nu),
            relation_names: Arc::new(relation_names),
            area: Arc::new(area),
            next_id,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Break the graph back into raw parts.
    pub fn to_parts(&self) -> GraphParts {
        GraphParts {
            vertices: self.vertices.values().cloned().collect(),
            edges: self.edges.iter().copied().collect(),
            cuts: self.cuts.iter().copied().collect(),
            nu: self
                .nu
                .iter()
                .map(|(edge, args)| (*edge, args.to_vec()))
                .collect(),
            relation_names: self
                .relation_names
                .iter()
                .map(|(edge, name)| (*edge, name.clone()))
                .collect(),
            area: self
                .area
                .iter()
                .map(|(ctx, elements)| (*ctx, elements.iter().copied().collect()))
                .collect(),
        }
    }

    // ========================================================================
    // Id allocation
    // ========================================================================

    /// A vertex id not used by any element of this graph.
    pub fn fresh_vertex_id(&self) -> VertexId {
        VertexId::new(self.next_id)
    }

    /// An edge id not used by any element of this graph.
    pub fn fresh_edge_id(&self) -> EdgeId {
        EdgeId::new(self.next_id)
    }

    /// A cut id not used by any element of this graph.
    pub fn fresh_cut_id(&self) -> CutId {
        CutId::new(self.next_id)
    }

    fn ensure_unused(&self, raw: u32) -> Result<(), GraphError> {
        if self.element(raw).is_some() || raw == SHEET_RAW_ID {
            return Err(GraphError::DuplicateElement(raw));
        }
        Ok(())
    }

    fn ensure_new_constant(&self, vertex: &Vertex) -> Result<(), GraphError> {
        let Some(name) = vertex.constant_name() else {
            return Ok(());
        };
        match self
            .vertices
            .values()
            .find(|v| v.constant_name() == Some(name))
        {
            Some(first) => Err(GraphError::DuplicateConstant {
                name: name.into(),
                first: first.id,
                second: vertex.id,
            }),
            None => Ok(()),
        }
    }

    fn ensure_context(&self, ctx: ContextId) -> Result<(), GraphError> {
        if self.contains_context(ctx) {
            Ok(())
        } else {
            Err(GraphError::UnknownContext(ctx))
        }
    }

    fn bump_next_id(&mut self, raw: u32) {
        self.next_id = self.next_id.max(raw.saturating_add(1));
    }

    fn area_mut(&mut self, ctx: ContextId) -> &mut IndexSet<ElementId> {
        let areas = Arc::make_mut(&mut self.area);
        Arc::make_mut(areas.entry(ctx).or_default())
    }

    /// Run the invariant checks on a candidate and hand it back.
    fn checked(self) -> Result<Self, GraphError> {
        self.validate()?;
        Ok(self)
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Add a vertex to the sheet.
    pub fn add_vertex(&self, vertex: Vertex) -> Result<Self, GraphError> {
        self.add_vertex_in_context(vertex, ContextId::Sheet)
    }

    /// Add a vertex to the area of `ctx`.
    pub fn add_vertex_in_context(&self, vertex: Vertex, ctx: ContextId) -> Result<Self, GraphError> {
        self.ensure_context(ctx)?;
        let id = vertex.id;
        self.ensure_unused(id.raw())?;
        self.ensure_new_constant(&vertex)?;

        let mut next = self.clone();
        Arc::make_mut(&mut next.vertices).insert(id, vertex);
        next.area_mut(ctx).insert(ElementId::Vertex(id));
        next.bump_next_id(id.raw());
        next.checked()
    }

    /// Add an edge named `relation` over `args` (order preserved) to `ctx`.
    pub fn add_edge(
        &self,
        edge: EdgeId,
        args: &[VertexId],
        relation: impl Into<SmolStr>,
        ctx: ContextId,
    ) -> Result<Self, GraphError> {
        self.ensure_context(ctx)?;
        self.ensure_unused(edge.raw())?;
        if let Some(missing) = args.iter().find(|v| !self.vertices.contains_key(*v)) {
            return Err(GraphError::UnknownVertex(*missing));
        }

        let mut next = self.clone();
        Arc::make_mut(&mut next.edges).insert(edge);
        Arc::make_mut(&mut next.nu).insert(edge, Arc::from(args));
        Arc::make_mut(&mut next.relation_names).insert(edge, relation.into());
        next.area_mut(ctx).insert(ElementId::Edge(edge));
        next.bump_next_id(edge.raw());
        next.checked()
    }

    /// Add an empty cut to the area of `parent`.
    pub fn add_cut(&self, cut: CutId, parent: ContextId) -> Result<Self, GraphError> {
        self.ensure_context(parent)?;
        self.ensure_unused(cut.raw())?;

        let mut next = self.clone();
        Arc::make_mut(&mut next.cuts).insert(cut);
        Arc::make_mut(&mut next.area).insert(ContextId::Cut(cut), Area::default());
        next.area_mut(parent).insert(ElementId::Cut(cut));
        next.bump_next_id(cut.raw());
        next.checked()
    }

    /// Move a vertex into the area of `ctx`. A no-op if it is already there.
    pub fn relocate_vertex(&self, vertex: VertexId, ctx: ContextId) -> Result<Self, GraphError> {
        self.ensure_context(ctx)?;
        let element = ElementId::Vertex(vertex);
        let current = self.parent_context_of(element)?;
        if current == ctx {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.area_mut(current).shift_remove(&element);
        next.area_mut(ctx).insert(element);
        next.checked()
    }

    /// Remove an element.
    ///
    /// Removing a cut promotes its contents into the cut's parent area.
    /// Removing a vertex that an edge still references fails with the
    /// invariant-2 error rather than cascading.
    pub fn remove_element(&self, element: ElementId) -> Result<Self, GraphError> {
        let parent = self.parent_context_of(element)?;
        let mut next = self.clone();
        next.area_mut(parent).shift_remove(&element);

        match element {
            ElementId::Vertex(v) => {
                Arc::make_mut(&mut next.vertices).shift_remove(&v);
            }
            ElementId::Edge(e) => {
                Arc::make_mut(&mut next.edges).shift_remove(&e);
                Arc::make_mut(&mut next.nu).shift_remove(&e);
                Arc::make_mut(&mut next.relation_names).shift_remove(&e);
            }
            ElementId::Cut(c) => {
                Arc::make_mut(&mut next.cuts).shift_remove(&c);
                let contents = Arc::make_mut(&mut next.area)
                    .shift_remove(&ContextId::Cut(c))
                    .unwrap_or_default();
                next.area_mut(parent).extend(contents.iter().copied());
            }
        }
        next.checked()
    }
}
