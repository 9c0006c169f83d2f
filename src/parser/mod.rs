//! EGIF front end: text to [`Graph`](crate::graph::Graph)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Comment pre-pass → '#' comments blanked, offsets kept
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser → recursive descent, shadow-stack scoping, Graph constructors
//!     ↓
//! Constant hoisting → each constant moved to the LCA of its occurrences
//!     ↓
//! Alphabet → relation arities checked
//! ```
//!
//! Parsing is all-or-nothing: the first error ends the parse and no partial
//! graph is returned.

#[allow(clippy::module_inception)]
mod parser;

pub mod errors;
mod lexer;
mod options;
mod preprocess;
mod scope;

pub use errors::{ErrorCode, LexError, LexErrorKind, ParseError, RelatedInfo, SyntaxError};
pub use lexer::{Lexer, Token, TokenKind, tokenize, unescape};
pub use options::{ParseOptions, UnresolvedNames};
pub use parser::{Parse, parse_egif, parse_egif_with, parse_many};
pub use preprocess::strip_comments;
