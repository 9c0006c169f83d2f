//! Constructor and query behaviour of the graph model through the public API.

#![allow(clippy::unwrap_used)]

use arisbe::{ContextId, CutId, EdgeId, ElementId, Graph, GraphError, Vertex, VertexId};
use rstest::rstest;

/// sheet: v1, "Socrates" (v2), Human(v2), c4 ⊃ { Mortal(v2), c6 ⊃ { P(v1) } }
fn socrates() -> Graph {
    let g = Graph::new()
        .add_vertex(Vertex::generic(VertexId::new(1)))
        .unwrap()
        .add_vertex(Vertex::constant(VertexId::new(2), "Socrates"))
        .unwrap()
        .add_edge(EdgeId::new(3), &[VertexId::new(2)], "Human", ContextId::Sheet)
        .unwrap()
        .add_cut(CutId::new(4), ContextId::Sheet)
        .unwrap();
    g.add_edge(EdgeId::new(5), &[VertexId::new(2)], "Mortal", CutId::new(4).into())
        .unwrap()
        .add_cut(CutId::new(6), CutId::new(4).into())
        .unwrap()
        .add_edge(EdgeId::new(7), &[VertexId::new(1)], "P", CutId::new(6).into())
        .unwrap()
}

#[test]
fn test_empty_graph_has_only_sheet() {
    let g = Graph::new();
    assert!(g.is_empty());
    assert_eq!(g.contexts().collect::<Vec<_>>(), vec![ContextId::Sheet]);
    assert!(g.area_of(ContextId::Sheet).unwrap().is_empty());
    assert!(g.validate().is_ok());
}

#[rstest]
#[case::sheet(ContextId::Sheet, 0, true)]
#[case::cut(ContextId::Cut(CutId::new(4)), 1, false)]
#[case::nested_cut(ContextId::Cut(CutId::new(6)), 2, true)]
fn test_context_depth_and_polarity(
    #[case] ctx: ContextId,
    #[case] depth: usize,
    #[case] positive: bool,
) {
    let g = socrates();
    assert_eq!(g.context_depth(ctx).unwrap(), depth);
    assert_eq!(g.is_positive_context(ctx).unwrap(), positive);
}

#[rstest]
#[case::sheet_vertex(ElementId::Vertex(VertexId::new(1)), 0)]
#[case::sheet_edge(ElementId::Edge(EdgeId::new(3)), 0)]
#[case::cut_itself(ElementId::Cut(CutId::new(4)), 0)]
#[case::edge_in_cut(ElementId::Edge(EdgeId::new(5)), 1)]
#[case::edge_in_nested_cut(ElementId::Edge(EdgeId::new(7)), 2)]
fn test_nesting_depth(#[case] element: ElementId, #[case] depth: usize) {
    assert_eq!(socrates().nesting_depth(element).unwrap(), depth);
}

#[rstest]
#[case::unknown_context(
    |g: &Graph| g.add_vertex_in_context(Vertex::generic(VertexId::new(50)), CutId::new(99).into()),
    GraphError::UnknownContext(ContextId::Cut(CutId::new(99)))
)]
#[case::duplicate_vertex(
    |g: &Graph| g.add_vertex(Vertex::generic(VertexId::new(1))),
    GraphError::DuplicateElement(1)
)]
#[case::vertex_reuses_edge_id(
    |g: &Graph| g.add_vertex(Vertex::generic(VertexId::new(3))),
    GraphError::DuplicateElement(3)
)]
#[case::edge_reuses_id(
    |g: &Graph| g.add_edge(EdgeId::new(5), &[VertexId::new(1)], "Q", ContextId::Sheet),
    GraphError::DuplicateElement(5)
)]
#[case::edge_unknown_vertex(
    |g: &Graph| g.add_edge(EdgeId::new(50), &[VertexId::new(1), VertexId::new(42)], "Q", ContextId::Sheet),
    GraphError::UnknownVertex(VertexId::new(42))
)]
#[case::cut_unknown_parent(
    |g: &Graph| g.add_cut(CutId::new(50), CutId::new(3).into()),
    GraphError::UnknownContext(ContextId::Cut(CutId::new(3)))
)]
#[case::cut_uses_sheet_id(
    |g: &Graph| g.add_cut(CutId::new(0), ContextId::Sheet),
    GraphError::DuplicateElement(0)
)]
#[case::constant_name_taken(
    |g: &Graph| g.add_vertex_in_context(Vertex::constant(VertexId::new(50), "Socrates"), CutId::new(4).into()),
    GraphError::DuplicateConstant {
        name: "Socrates".into(),
        first: VertexId::new(2),
        second: VertexId::new(50),
    }
)]
#[case::remove_used_vertex(
    |g: &Graph| g.remove_element(ElementId::Vertex(VertexId::new(2))),
    GraphError::InvalidNu { edge: EdgeId::new(3), vertex: Some(VertexId::new(2)) }
)]
#[case::remove_unknown(
    |g: &Graph| g.remove_element(ElementId::Edge(EdgeId::new(77))),
    GraphError::UnknownElement(ElementId::Edge(EdgeId::new(77)))
)]
fn test_constructor_errors(
    #[case] op: fn(&Graph) -> Result<Graph, GraphError>,
    #[case] expected: GraphError,
) {
    let g = socrates();
    let before = g.clone();
    assert_eq!(op(&g).unwrap_err(), expected);
    assert_eq!(g, before);
}

#[test]
fn test_same_name_constants_rejected_from_parts() {
    let mut parts = Graph::new()
        .add_vertex(Vertex::constant(VertexId::new(1), "a"))
        .unwrap()
        .to_parts();
    parts.vertices.push(Vertex::constant(VertexId::new(2), "a"));
    parts.edges.push(EdgeId::new(3));
    parts.nu.push((EdgeId::new(3), vec![VertexId::new(1), VertexId::new(2)]));
    parts.relation_names.push((EdgeId::new(3), "R".into()));
    parts.area[0]
        .1
        .extend([ElementId::Vertex(VertexId::new(2)), ElementId::Edge(EdgeId::new(3))]);

    assert_eq!(
        Graph::from_parts(parts).unwrap_err(),
        GraphError::DuplicateConstant {
            name: "a".into(),
            first: VertexId::new(1),
            second: VertexId::new(2),
        }
    );
}

#[test]
fn test_distinct_constants_survive_generation() {
    let g = Graph::new()
        .add_vertex(Vertex::constant(VertexId::new(1), "a"))
        .unwrap()
        .add_vertex(Vertex::constant(VertexId::new(2), "b"))
        .unwrap();
    let g = g
        .add_edge(EdgeId::new(3), &[VertexId::new(1), VertexId::new(2)], "R", ContextId::Sheet)
        .unwrap();
    let text = arisbe::generate_egif(&g).unwrap();
    assert_eq!(text, r#"(R "a" "b")"#);
    assert_eq!(arisbe::parse_egif(&text).unwrap().graph().vertex_count(), 2);
}

#[test]
fn test_removing_cut_promotes_nested_cut_and_edges() {
    let g = socrates().remove_element(ElementId::Cut(CutId::new(4))).unwrap();
    let sheet = g.area_of(ContextId::Sheet).unwrap();
    assert!(sheet.contains(&ElementId::Edge(EdgeId::new(5))));
    assert!(sheet.contains(&ElementId::Cut(CutId::new(6))));
    // c6 moved up a level, so its contents are now at depth 1
    assert_eq!(g.nesting_depth(ElementId::Edge(EdgeId::new(7))).unwrap(), 1);
    assert!(g.validate().is_ok());
}

#[test]
fn test_full_context_is_recursive() {
    let g = socrates();
    let full = g.full_context_of(CutId::new(4).into()).unwrap();
    assert_eq!(full.len(), 3);
    assert!(full.contains(&ElementId::Edge(EdgeId::new(7))));
    assert_eq!(g.area_of(CutId::new(4).into()).unwrap().len(), 2);
}

#[test]
fn test_relocate_vertex_into_cut_and_back() {
    let g = socrates();
    let moved = g
        .relocate_vertex(VertexId::new(1), CutId::new(6).into())
        .unwrap();
    assert_eq!(
        moved.parent_context_of(ElementId::Vertex(VertexId::new(1))).unwrap(),
        ContextId::Cut(CutId::new(6))
    );
    let back = moved.relocate_vertex(VertexId::new(1), ContextId::Sheet).unwrap();
    assert_eq!(
        back.parent_context_of(ElementId::Vertex(VertexId::new(1))).unwrap(),
        ContextId::Sheet
    );
    assert_eq!(back.vertex_count(), g.vertex_count());
}

#[test]
fn test_context_tree_lca_of_uses() {
    let g = socrates();
    let tree = g.context_tree();
    let uses = g.use_contexts(&tree, VertexId::new(2));
    assert_eq!(
        uses,
        vec![ContextId::Sheet, ContextId::Cut(CutId::new(4))]
    );
    assert_eq!(tree.lca(uses), Some(ContextId::Sheet));
    assert_eq!(
        tree.lca(g.use_contexts(&tree, VertexId::new(1))),
        Some(ContextId::Cut(CutId::new(6)))
    );
}

#[test]
fn test_fresh_ids_never_collide() {
    let g = socrates();
    let v = g.fresh_vertex_id();
    let g = g.add_vertex(Vertex::generic(v)).unwrap();
    let c = g.fresh_cut_id();
    assert_ne!(v.raw(), c.raw());
    assert!(g.element(c.raw()).is_none());
}

#[test]
fn test_edges_using_in_insertion_order() {
    let g = socrates();
    assert_eq!(
        g.edges_using(VertexId::new(2)),
        vec![EdgeId::new(3), EdgeId::new(5)]
    );
    assert!(g.edges_using(VertexId::new(99)).is_empty());
}
