//! Generation options

/// Line layout of generated EGIF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Everything on one line, nodes separated by single spaces
    #[default]
    Compact,
    /// One node per line, cut contents indented
    Indented,
}

/// Generation options for EGIF output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub layout: Layout,
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
    /// Prefix of generated labels: `x` gives `x1`, `x2`, ...
    pub label_prefix: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Compact,
            tab_size: 4,
            insert_spaces: true,
            label_prefix: "x".to_string(),
        }
    }
}

impl GenerateOptions {
    /// Compact layout with default labels.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented layout with default labels.
    pub fn indented() -> Self {
        Self {
            layout: Layout::Indented,
            ..Self::default()
        }
    }

    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }
}
