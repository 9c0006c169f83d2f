//! Error types for graph construction and queries.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{ContextId, CutId, EdgeId, ElementId, VertexId};

/// Errors raised by [`Graph`](super::Graph) constructors and queries.
///
/// A constructor that returns an error leaves its receiver untouched; there
/// is never a partially built graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The context is neither the sheet nor a cut of this graph.
    #[error("unknown context {0}")]
    UnknownContext(ContextId),

    /// A vertex id that is not part of this graph.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    /// An element id that is not part of this graph.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// The raw id is already taken by a vertex, edge or cut.
    #[error("element id {0} is already in use")]
    DuplicateElement(u32),

    /// Two constant vertices carry the same name.
    #[error("constant \"{name}\" is already {first}, cannot also be {second}")]
    DuplicateConstant {
        name: SmolStr,
        first: VertexId,
        second: VertexId,
    },

    /// One relation name observed with two different arities.
    #[error("relation '{relation}' has arity {found} on {edge}, but arity {expected} elsewhere")]
    ArityConflict {
        relation: SmolStr,
        expected: usize,
        found: usize,
        edge: EdgeId,
    },

    // ------------------------------------------------------------------
    // Structural invariants
    // ------------------------------------------------------------------
    /// Invariant 1: vertex, edge and cut ids are pairwise disjoint and never
    /// equal to the sheet's id.
    #[error("id {raw} is shared by two elements or collides with the sheet")]
    IdOverlap { raw: u32 },

    /// Invariant 2: ν is total over edges and references only vertices.
    #[error("{}", nu_message(.edge, .vertex))]
    InvalidNu {
        edge: EdgeId,
        vertex: Option<VertexId>,
    },

    /// Invariant 3: every edge carries exactly one relation name.
    #[error("relation name is missing or dangling for {edge}")]
    MissingRelationName { edge: EdgeId },

    /// Invariant 4: areas of distinct contexts are disjoint.
    #[error("{element} lies in the area of both {first} and {second}")]
    AreaOverlap {
        element: ElementId,
        first: ContextId,
        second: ContextId,
    },

    /// Invariant 5: the areas cover every element exactly once.
    #[error("area coverage violated at id {raw}: {detail}")]
    AreaCoverage { raw: u32, detail: &'static str },

    /// Invariant 6: containment is acyclic.
    #[error("{cut} encloses itself")]
    CyclicContainment { cut: CutId },
}

fn nu_message(edge: &EdgeId, vertex: &Option<VertexId>) -> String {
    match vertex {
        Some(vertex) => format!("ν({edge}) references unknown vertex {vertex}"),
        None => format!("ν is undefined or dangling for {edge}"),
    }
}

impl GraphError {
    /// Whether this error reports a broken structural invariant (as opposed
    /// to a bad argument).
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::IdOverlap { .. }
                | Self::InvalidNu { .. }
                | Self::MissingRelationName { .. }
                | Self::AreaOverlap { .. }
                | Self::AreaCoverage { .. }
                | Self::CyclicContainment { .. }
        )
    }

    /// The invariant number (1-6) this error reports, if any.
    pub fn invariant(&self) -> Option<u8> {
        match self {
            Self::IdOverlap { .. } => Some(1),
            Self::InvalidNu { .. } => Some(2),
            Self::MissingRelationName { .. } => Some(3),
            Self::AreaOverlap { .. } => Some(4),
            Self::AreaCoverage { .. } => Some(5),
            Self::CyclicContainment { .. } => Some(6),
            _ => None,
        }
    }
}
