//! Canonical EGIF generation: [`Graph`] back to text.
//!
//! The output is deterministic for a given graph and reparses (with default
//! [`ParseOptions`](crate::parser::ParseOptions)) to a graph with the same
//! vertex, edge and cut counts, the same argument shapes and the same
//! relation names.
//!
//! Labels are generated (`x1`, `x2`, ...), each generic vertex is defined
//! exactly once, at the innermost context enclosing its own area and every
//! context that uses it.

mod emit;
mod naming;
mod options;

pub use naming::{is_identifier, quote};
pub use options::{GenerateOptions, Layout};

use tracing::debug;

use crate::graph::{Graph, GraphError};
use emit::Emitter;

const DEFAULT_LABEL_PREFIX: &str = "x";

/// Generate compact EGIF with default options
pub fn generate_egif(graph: &Graph) -> Result<String, GraphError> {
    Generator::default().generate(graph)
}

/// EGIF generator with fixed options
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GenerateOptions,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn generate(&self, graph: &Graph) -> Result<String, GraphError> {
        let prefix = if is_identifier(&self.options.label_prefix) {
            self.options.label_prefix.as_str()
        } else {
            debug!(prefix = %self.options.label_prefix, "label prefix is not a name, using default");
            DEFAULT_LABEL_PREFIX
        };
        Emitter::new(graph, prefix).emit(&self.options)
    }
}
