//! Error code definitions for EGIF diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid characters, strings)
//! - E02xx: Structural errors (parentheses, brackets, cuts)
//! - E03xx: Scope errors (defining and bound occurrences)
//! - E04xx: Alphabet errors (relation arity)
//! - E05xx: Graph model errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for EGIF diagnostics
///
/// Each error code represents a specific category of error, enabling
/// filtering and documentation in tools built on the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors (delimiters)
    // =========================================================================
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[` or cut `~[`
    E0204,
    /// Unexpected closing delimiter
    E0205,

    // =========================================================================
    // E03xx: Scope errors
    // =========================================================================
    /// Two defining occurrences of one name in one area
    E0301,
    /// Bound occurrence of a name that was never defined
    E0302,
    /// Bound occurrence outside the scope of its definition
    E0303,

    // =========================================================================
    // E04xx: Alphabet errors
    // =========================================================================
    /// Relation used with two different arities
    E0401,

    // =========================================================================
    // E05xx: Graph model errors
    // =========================================================================
    /// The graph rejected a construction step
    E0501,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0301")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0401 => "E0401",
            Self::E0501 => "E0501",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0203 | Self::E0204 | Self::E0205 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 => "scope error",
            Self::E0401 => "alphabet error",
            Self::E0501 => "graph error",
            Self::E0901 | Self::E0902 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0301 => "duplicate definition",
            Self::E0302 => "undefined variable",
            Self::E0303 => "variable out of scope",
            Self::E0401 => "arity conflict",
            Self::E0501 => "invalid graph construction",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0203 | Self::E0204 | Self::E0205)
    }

    /// Check if this error comes from scope resolution
    pub fn is_scope(&self) -> bool {
        matches!(self, Self::E0301 | Self::E0302 | Self::E0303)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
