//! Front-end error types
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Hints/suggestions for fixes
//! - Related source locations
//! - Rendering against the source text

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use crate::base::LineIndex;
use crate::graph::GraphError;

/// Related location information for an error
///
/// Used to point to related source locations, e.g.,
/// "cut opened here" pointing to the opening `~[`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    /// Create a new related info
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A grammar violation: an unexpected token or an unclosed delimiter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    /// Create a new syntax error with minimal information
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
            related: vec![],
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// What went wrong while lexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// A character that starts no token
    InvalidCharacter,
    /// A `"` with no closing quote before end of input
    UnterminatedString,
}

/// A fatal lexing error: the offending character and its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", lex_message(.kind, .ch, .offset))]
pub struct LexError {
    pub ch: char,
    pub offset: TextSize,
    pub kind: LexErrorKind,
}

fn lex_message(kind: &LexErrorKind, ch: &char, offset: &TextSize) -> String {
    let what = match kind {
        LexErrorKind::InvalidCharacter => "invalid character",
        LexErrorKind::UnterminatedString => "unterminated string starting with",
    };
    format!("{what} '{}' at offset {}", ch.escape_debug(), u32::from(*offset))
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidCharacter => ErrorCode::E0101,
            LexErrorKind::UnterminatedString => ErrorCode::E0102,
        }
    }

    /// The offending character's range.
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.ch))
    }
}

/// Any error raised while turning EGIF text into a graph
///
/// Parsing is all-or-nothing: on error no partial graph is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Two defining occurrences of one name in one area.
    #[error("'{name}' is already defined in this area")]
    DuplicateDefinition {
        name: SmolStr,
        range: TextRange,
        first: TextRange,
    },

    /// A bound occurrence with no defining occurrence anywhere before it.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: SmolStr, range: TextRange },

    /// A bound occurrence whose defining occurrence does not enclose it.
    #[error("variable '{name}' is used outside the scope of its definition")]
    OutOfScopeVariable {
        name: SmolStr,
        range: TextRange,
        defined: TextRange,
    },

    /// One relation name used with two different arities.
    #[error("relation '{relation}' takes {expected} argument(s) but is used with {found}")]
    ArityConflict {
        relation: SmolStr,
        expected: usize,
        found: usize,
        range: TextRange,
    },

    /// The graph rejected a construction step.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(err) => err.code(),
            Self::Syntax(err) => err.code,
            Self::DuplicateDefinition { .. } => ErrorCode::E0301,
            Self::UndefinedVariable { .. } => ErrorCode::E0302,
            Self::OutOfScopeVariable { .. } => ErrorCode::E0303,
            Self::ArityConflict { .. } => ErrorCode::E0401,
            Self::Graph(_) => ErrorCode::E0501,
        }
    }

    /// Source range of the offending token, when there is one.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Lex(err) => Some(err.range()),
            Self::Syntax(err) => Some(err.range),
            Self::DuplicateDefinition { range, .. }
            | Self::UndefinedVariable { range, .. }
            | Self::OutOfScopeVariable { range, .. }
            | Self::ArityConflict { range, .. } => Some(*range),
            Self::Graph(_) => None,
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Syntax(err) => err.hint.clone(),
            Self::DuplicateDefinition { name, .. } => Some(format!(
                "use the bound occurrence '{name}' to refer to the existing definition"
            )),
            Self::UndefinedVariable { name, .. } => Some(format!(
                "introduce it with a defining occurrence '*{name}' first"
            )),
            Self::OutOfScopeVariable { name, .. } => Some(format!(
                "move the defining occurrence '*{name}' to an area enclosing this use"
            )),
            Self::Lex(_) | Self::ArityConflict { .. } | Self::Graph(_) => None,
        }
    }

    /// Secondary locations, e.g. the first definition of a duplicated name.
    pub fn related(&self) -> Vec<RelatedInfo> {
        match self {
            Self::Syntax(err) => err.related.clone(),
            Self::DuplicateDefinition { first, .. } => {
                vec![RelatedInfo::new("first defined here", *first)]
            }
            Self::OutOfScopeVariable { defined, .. } => {
                vec![RelatedInfo::new("defined here", *defined)]
            }
            _ => vec![],
        }
    }

    /// Render a diagnostic against the text that was parsed.
    ///
    /// ```text
    /// error[E0302]: undefined variable 'y'
    ///  --> 1:8
    ///   hint: ...
    /// ```
    pub fn render(&self, source: &str) -> String {
        let index = LineIndex::new(source);
        let mut out = format!("error[{}]: {}", self.code(), self);
        if let Some(range) = self.range() {
            let pos = index.line_col(range.start());
            out.push_str(&format!("\n --> {}:{}", pos.line + 1, pos.col + 1));
        }
        for info in self.related() {
            let pos = index.line_col(info.range.start());
            out.push_str(&format!("\n note: {} at {}:{}", info.message, pos.line + 1, pos.col + 1));
        }
        if let Some(hint) = self.hint() {
            out.push_str(&format!("\n  hint: {}", hint));
        }
        out
    }
}
