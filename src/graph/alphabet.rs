//! Alphabet: the constant and relation names a graph is written over.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use super::{Graph, GraphError};

/// Distinct constant names and relation names (with arity), in first-seen
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    constants: IndexSet<SmolStr>,
    relations: IndexMap<SmolStr, usize>,
}

impl Alphabet {
    /// Collect the alphabet of `graph`.
    ///
    /// Fails on the first edge whose relation name was already seen with a
    /// different arity.
    pub fn from_graph(graph: &Graph) -> Result<Self, GraphError> {
        let mut alphabet = Self::default();
        for vertex in graph.vertices() {
            if let Some(name) = vertex.constant_name() {
                alphabet.constants.insert(SmolStr::new(name));
            }
        }
        for edge in graph.edges() {
            let found = graph.nu(edge).map_or(0, |args| args.len());
            let relation = graph
                .relation_name(edge)
                .ok_or(GraphError::MissingRelationName { edge })?;
            match alphabet.relations.get(relation) {
                Some(&expected) if expected != found => {
                    return Err(GraphError::ArityConflict {
                        relation: SmolStr::new(relation),
                        expected,
                        found,
                        edge,
                    });
                }
                Some(_) => {}
                None => {
                    alphabet.relations.insert(SmolStr::new(relation), found);
                }
            }
        }
        Ok(alphabet)
    }

    pub fn constants(&self) -> impl Iterator<Item = &str> + '_ {
        self.constants.iter().map(|c| c.as_str())
    }

    /// Relation names paired with their arity.
    pub fn relations(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.relations.iter().map(|(name, arity)| (name.as_str(), *arity))
    }

    pub fn arity(&self, relation: &str) -> Option<usize> {
        self.relations.get(relation).copied()
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }
}
