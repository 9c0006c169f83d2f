//! Structural invariant checks.
//!
//! 1. Vertex, edge and cut ids are pairwise disjoint; the sheet id is
//!    disjoint from all of them.
//! 2. ν is total over edges and references only existing vertices.
//! 3. The relation-name mapping is total over edges.
//! 4. Areas of distinct contexts are disjoint.
//! 5. The union of all areas is exactly the set of elements.
//! 6. Containment is acyclic.
//!
//! Constant names are also checked: a name denotes one individual, so two
//! constant vertices never share it.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Graph, GraphError};
use crate::base::{ContextId, CutId, ElementId, SHEET_RAW_ID, VertexId};

impl Graph {
    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.check_disjoint_ids()?;
        self.check_constant_names()?;
        self.check_nu()?;
        self.check_relation_names()?;
        let owners = self.check_areas()?;
        self.check_acyclic(&owners)
    }

    fn check_disjoint_ids(&self) -> Result<(), GraphError> {
        let mut seen: FxHashMap<u32, ElementId> = FxHashMap::default();
        let all = self
            .vertices
            .keys()
            .map(|v| ElementId::Vertex(*v))
            .chain(self.edges.iter().map(|e| ElementId::Edge(*e)))
            .chain(self.cuts.iter().map(|c| ElementId::Cut(*c)));
        for element in all {
            let raw = element.raw();
            if raw == SHEET_RAW_ID || seen.insert(raw, element).is_some() {
                return Err(GraphError::IdOverlap { raw });
            }
        }
        Ok(())
    }

    fn check_constant_names(&self) -> Result<(), GraphError> {
        let mut seen: FxHashMap<&str, VertexId> = FxHashMap::default();
        for vertex in self.vertices.values() {
            let Some(name) = vertex.constant_name() else {
                continue;
            };
            if let Some(first) = seen.insert(name, vertex.id) {
                return Err(GraphError::DuplicateConstant {
                    name: name.into(),
                    first,
                    second: vertex.id,
                });
            }
        }
        Ok(())
    }

    fn check_nu(&self) -> Result<(), GraphError> {
        for edge in self.edges.iter() {
            let args = self
                .nu
                .get(edge)
                .ok_or(GraphError::InvalidNu { edge: *edge, vertex: None })?;
            if let Some(vertex) = args.iter().find(|v| !self.vertices.contains_key(*v)) {
                return Err(GraphError::InvalidNu {
                    edge: *edge,
                    vertex: Some(*vertex),
                });
            }
        }
        if let Some(edge) = self.nu.keys().find(|e| !self.edges.contains(*e)) {
            return Err(GraphError::InvalidNu { edge: *edge, vertex: None });
        }
        Ok(())
    }

    fn check_relation_names(&self) -> Result<(), GraphError> {
        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| !self.relation_names.contains_key(*e))
        {
            return Err(GraphError::MissingRelationName { edge: *edge });
        }
        if let Some(edge) = self
            .relation_names
            .keys()
            .find(|e| !self.edges.contains(*e))
        {
            return Err(GraphError::MissingRelationName { edge: *edge });
        }
        Ok(())
    }

    /// Invariants 4 and 5. Returns the owning context of every element.
    fn check_areas(&self) -> Result<FxHashMap<ElementId, ContextId>, GraphError> {
        if let Some(ctx) = self.area.keys().find(|ctx| !self.contains_context(**ctx)) {
            return Err(GraphError::UnknownContext(*ctx));
        }
        if let Some(cut) = self
            .cuts
            .iter()
            .find(|c| !self.area.contains_key(&ContextId::Cut(**c)))
        {
            return Err(GraphError::AreaCoverage {
                raw: cut.raw(),
                detail: "cut has no area",
            });
        }

        let mut owners: FxHashMap<ElementId, ContextId> = FxHashMap::default();
        for (ctx, elements) in self.area.iter() {
            for element in elements.iter() {
                if !self.contains_element(*element) {
                    return Err(GraphError::AreaCoverage {
                        raw: element.raw(),
                        detail: "area lists an element that does not exist",
                    });
                }
                if let Some(first) = owners.insert(*element, *ctx) {
                    return Err(GraphError::AreaOverlap {
                        element: *element,
                        first,
                        second: *ctx,
                    });
                }
            }
        }

        let orphan = self
            .vertices
            .keys()
            .map(|v| ElementId::Vertex(*v))
            .chain(self.edges.iter().map(|e| ElementId::Edge(*e)))
            .chain(self.cuts.iter().map(|c| ElementId::Cut(*c)))
            .find(|element| !owners.contains_key(element));
        if let Some(element) = orphan {
            return Err(GraphError::AreaCoverage {
                raw: element.raw(),
                detail: "element is not in any area",
            });
        }
        Ok(owners)
    }

    /// Every cut must reach the sheet. Each walk stops at the first cut
    /// already known to reach it, so every cut is visited once overall.
    fn check_acyclic(&self, owners: &FxHashMap<ElementId, ContextId>) -> Result<(), GraphError> {
        let limit = self.cuts.len();
        let mut reaches_sheet: FxHashSet<CutId> = FxHashSet::default();
        let mut path: Vec<CutId> = Vec::new();
        for cut in self.cuts.iter() {
            let mut current = ContextId::Cut(*cut);
            while let ContextId::Cut(inner) = current {
                if reaches_sheet.contains(&inner) {
                    break;
                }
                if path.len() > limit {
                    return Err(GraphError::CyclicContainment { cut: *cut });
                }
                path.push(inner);
                current = parent_of(owners, inner)?;
            }
            reaches_sheet.extend(path.drain(..));
        }
        Ok(())
    }
}

fn parent_of(owners: &FxHashMap<ElementId, ContextId>, cut: CutId) -> Result<ContextId, GraphError> {
    owners
        .get(&ElementId::Cut(cut))
        .copied()
        .ok_or(GraphError::AreaCoverage {
            raw: cut.raw(),
            detail: "element is not in any area",
        })
}
