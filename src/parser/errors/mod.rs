//! Parser error handling module
//!
//! This module provides the diagnostics of the EGIF front end:
//! - Categorized error codes for filtering and documentation
//! - Context-aware syntax error messages
//! - Hints for common mistakes
//! - Related span tracking (e.g., "cut opened here" for unclosed cuts)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{LexError, LexErrorKind, ParseError, RelatedInfo, SyntaxError};
