//! Parse options

/// How a bare name with no defining occurrence in scope is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnresolvedNames {
    /// Raise `UndefinedVariable` (or `OutOfScopeVariable`)
    #[default]
    Reject,
    /// Read the name as the constant of that name, as Sowa's EGIF does.
    /// A name whose definitions have all been closed is still
    /// `OutOfScopeVariable`.
    AsConstants,
}

/// Parsing options for EGIF text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treatment of bare names that resolve to no defining occurrence
    pub unresolved_names: UnresolvedNames,
}

impl ParseOptions {
    /// Options that read free bare names as constants.
    pub fn lenient() -> Self {
        Self {
            unresolved_names: UnresolvedNames::AsConstants,
        }
    }
}
