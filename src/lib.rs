//! # arisbe-base
//!
//! Core library for Peirce's Existential Graphs: Dau's relational graph with
//! cuts, and the EGIF linear notation that reads and writes it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! generator → Canonical EGIF output (label allocation, anchoring, layout)
//!   ↓
//! parser    → Comment pre-pass, logos lexer, scope-aware recursive descent
//!   ↓
//! graph     → Persistent Graph, invariant checks, context tree, alphabet
//!   ↓
//! base      → Primitives (element ids, line/column conversion)
//! ```
//!
//! The parser and the generator both sit on top of [`graph`]; neither depends
//! on the other.

// ============================================================================
// MODULES (dependency order: base → graph → parser → generator)
// ============================================================================

/// Foundation types: element ids, LineIndex
pub mod base;

/// The relational graph with cuts
pub mod graph;

/// EGIF front end: lexer, scope resolution, recursive-descent parser
pub mod parser;

/// EGIF back end: canonical generator
pub mod generator;

// Re-export foundation types
pub use base::{ContextId, CutId, EdgeId, ElementId, LineCol, LineIndex, VertexId};

// Re-export the model and both directions of the notation
pub use generator::{GenerateOptions, Generator, Layout, generate_egif};
pub use graph::{Alphabet, ContextTree, Graph, GraphError, GraphParts, Vertex, VertexKind};
pub use parser::{
    Parse, ParseError, ParseOptions, UnresolvedNames, parse_egif, parse_egif_with, parse_many,
};
