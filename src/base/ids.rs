//! Element identifiers.
//!
//! Vertices, edges and cuts draw their ids from one shared numeric space so
//! that "is this id a vertex, an edge or a cut?" always has a single answer.
//! The sheet of assertion owns the reserved raw id [`SHEET_RAW_ID`].

use std::fmt;

/// Raw id reserved for the sheet of assertion.
pub const SHEET_RAW_ID: u32 = 0;

macro_rules! element_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw id.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw numeric id.
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

element_id!(
    /// Identity of a vertex (a line-of-identity endpoint or a constant).
    VertexId,
    "v"
);
element_id!(
    /// Identity of an edge (one relation occurrence).
    EdgeId,
    "e"
);
element_id!(
    /// Identity of a cut (a negation boundary).
    CutId,
    "c"
);

/// A context: the sheet of assertion or the area inside a cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextId {
    Sheet,
    Cut(CutId),
}

impl ContextId {
    /// The raw id of this context (the sheet is [`SHEET_RAW_ID`]).
    pub fn raw(self) -> u32 {
        match self {
            ContextId::Sheet => SHEET_RAW_ID,
            ContextId::Cut(cut) => cut.raw(),
        }
    }

    pub fn is_sheet(self) -> bool {
        matches!(self, ContextId::Sheet)
    }

    pub fn as_cut(self) -> Option<CutId> {
        match self {
            ContextId::Sheet => None,
            ContextId::Cut(cut) => Some(cut),
        }
    }
}

impl From<CutId> for ContextId {
    fn from(cut: CutId) -> Self {
        ContextId::Cut(cut)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextId::Sheet => write!(f, "sheet"),
            ContextId::Cut(cut) => write!(f, "{cut}"),
        }
    }
}

/// Any element that can sit in an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    Vertex(VertexId),
    Edge(EdgeId),
    Cut(CutId),
}

impl ElementId {
    pub fn raw(self) -> u32 {
        match self {
            ElementId::Vertex(v) => v.raw(),
            ElementId::Edge(e) => e.raw(),
            ElementId::Cut(c) => c.raw(),
        }
    }

    /// Human-readable kind name, used in diagnostics.
    pub fn kind_name(self) -> &'static str {
        match self {
            ElementId::Vertex(_) => "vertex",
            ElementId::Edge(_) => "edge",
            ElementId::Cut(_) => "cut",
        }
    }

    pub fn as_vertex(self) -> Option<VertexId> {
        match self {
            ElementId::Vertex(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_edge(self) -> Option<EdgeId> {
        match self {
            ElementId::Edge(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_cut(self) -> Option<CutId> {
        match self {
            ElementId::Cut(c) => Some(c),
            _ => None,
        }
    }
}

impl From<VertexId> for ElementId {
    fn from(v: VertexId) -> Self {
        ElementId::Vertex(v)
    }
}

impl From<EdgeId> for ElementId {
    fn from(e: EdgeId) -> Self {
        ElementId::Edge(e)
    }
}

impl From<CutId> for ElementId {
    fn from(c: CutId) -> Self {
        ElementId::Cut(c)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Vertex(v) => write!(f, "{v}"),
            ElementId::Edge(e) => write!(f, "{e}"),
            ElementId::Cut(c) => write!(f, "{c}"),
        }
    }
}
