//! Parse context tracking for context-aware error messages
//!
//! Each grammar rule knows which construct it is inside of; the description
//! and closing delimiter feed "unclosed ..." and "unexpected ..." messages.

use crate::parser::TokenKind;

/// The construct being parsed when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level (the sheet of assertion)
    TopLevel,
    /// Inside a cut `~[ ... ]`
    Cut,
    /// Inside a relation `( ... )`
    Relation,
    /// Inside a bracketed declaration `[*x]`
    Declaration,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::Cut => "in cut",
            Self::Relation => "in relation",
            Self::Declaration => "in declaration",
        }
    }

    /// What the parser accepts next in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a relation, a cut, a declaration or a vertex",
            Self::Cut => "a relation, a cut, a declaration, a vertex or ']'",
            Self::Relation => "an argument ('*x', 'x' or a quoted constant) or ')'",
            Self::Declaration => "a defining label such as '*x' or a quoted constant",
        }
    }

    /// The token that closes this context, if any
    pub fn closing_delimiter(&self) -> Option<TokenKind> {
        match self {
            Self::TopLevel => None,
            Self::Cut | Self::Declaration => Some(TokenKind::RBracket),
            Self::Relation => Some(TokenKind::RParen),
        }
    }
}
