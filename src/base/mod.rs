//! Foundation types for the arisbe toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`VertexId`], [`EdgeId`], [`CutId`] - Typed element identifiers
//! - [`ContextId`] - The sheet of assertion or a cut
//! - [`ElementId`] - Tagged union over vertices, edges and cuts
//! - [`LineCol`], [`LineIndex`] - Line/column conversion for diagnostics
//!
//! This module has NO dependencies on other arisbe modules.

mod ids;
mod position;

pub use ids::{ContextId, CutId, EdgeId, ElementId, SHEET_RAW_ID, VertexId};
pub use position::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
