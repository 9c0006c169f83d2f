//! Scope resolution, constant identity and placement.

#![allow(clippy::unwrap_used)]

use arisbe::{
    ContextId, ElementId, Graph, ParseError, ParseOptions, parse_egif, parse_egif_with,
};
use rstest::rstest;

use crate::helpers::fixtures::{DONKEY, SHADOWING, SOCRATES, VALID_CORPUS};
use crate::helpers::graph_assertions::{child_cuts, constant, edge_depths, home};

fn parse(input: &str) -> Graph {
    parse_egif(input)
        .unwrap_or_else(|err| panic!("{}", err.render(input)))
        .into_graph()
}

#[test]
fn test_corpus_parses() {
    for input in VALID_CORPUS.iter() {
        let result = parse_egif(input);
        assert!(result.is_ok(), "{}", result.unwrap_err().render(input));
    }
}

#[test]
fn test_shadowing_resolves_inner_then_outer() {
    let graph = parse(SHADOWING);
    assert_eq!(graph.vertex_count(), 2);

    let by_name = |name: &str| {
        graph
            .edges()
            .find(|e| graph.relation_name(*e) == Some(name))
            .map(|e| graph.nu(e).unwrap()[0])
            .unwrap()
    };
    // Inside the cut P and Q share the inner x; R after the cut sees the outer x
    assert_eq!(by_name("P"), by_name("Q"));
    assert_ne!(by_name("P"), by_name("R"));
    assert_eq!(home(&graph, by_name("R")), ContextId::Sheet);
}

#[test]
fn test_bound_occurrence_in_nested_cut_sees_outer_definition() {
    let graph = parse(DONKEY);
    assert_eq!(graph.vertex_count(), 2);
    let outer = child_cuts(&graph, ContextId::Sheet)[0];
    for vertex in graph.vertices() {
        assert_eq!(home(&graph, vertex.id), outer);
    }
    assert_eq!(
        edge_depths(&graph),
        vec![
            ("Beats".to_string(), 2),
            ("Donkey".to_string(), 1),
            ("Farmer".to_string(), 1),
            ("Owns".to_string(), 1),
        ]
    );
}

#[rstest]
#[case::two_declarations("[*x] [*x]")]
#[case::two_relations("(P *x) (Q *x)")]
#[case::same_relation("(P *x *x)")]
#[case::inside_cut("~[ [*y] (P *y) ]")]
fn test_duplicate_definition(#[case] input: &str) {
    let err = parse_egif(input).unwrap_err();
    assert!(
        matches!(err, ParseError::DuplicateDefinition { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::sibling_cut("~[ (P *x) ] ~[ (Q x) ]")]
#[case::after_cut("~[ [*x] ] (Q x)")]
#[case::nested_then_outer("~[ ~[ (P *x) ] (Q x) ]")]
fn test_out_of_scope_variable(#[case] input: &str) {
    let err = parse_egif(input).unwrap_err();
    assert!(
        matches!(err, ParseError::OutOfScopeVariable { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::never_defined("(P x)")]
#[case::used_before_definition("(P x) (Q *x)")]
#[case::isolated("y")]
fn test_undefined_variable(#[case] input: &str) {
    let err = parse_egif(input).unwrap_err();
    assert!(
        matches!(err, ParseError::UndefinedVariable { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::same_area("(P *x) ~[ (Q *x) ]")]
#[case::sibling_cuts("~[ (P *x) ] ~[ (Q *x) ]")]
#[case::nested("[*x] ~[ [*x] ~[ [*x] ] ]")]
fn test_shadowing_across_contexts_is_legal(#[case] input: &str) {
    assert!(parse_egif(input).is_ok());
}

#[test]
fn test_constant_placed_at_lca() {
    let graph = parse(SOCRATES);
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(home(&graph, constant(&graph, "Socrates")), ContextId::Sheet);
}

#[test]
fn test_constant_identity_across_cuts() {
    let graph = parse(SOCRATES);
    let socrates = constant(&graph, "Socrates");
    let users = graph.edges_using(socrates);
    assert_eq!(users.len(), 2);
    for edge in users {
        assert_eq!(graph.nu(edge).unwrap(), &[socrates]);
    }
}

#[rstest]
#[case::single_use_in_cut(r#"~[ (P "a") ]"#, &[0])]
#[case::uses_in_two_nested_cuts(r#"~[ ~[ (P "a") ] ~[ (Q "a") ] ]"#, &[0])]
#[case::deep_and_shallow(r#"~[ (P "a") ~[ ~[ (Q "a") ] ] ]"#, &[0])]
#[case::sheet_and_cut(r#"(P "a") ~[ (Q "a") ]"#, &[])]
fn test_constant_hoisting_target(#[case] input: &str, #[case] path: &[usize]) {
    let graph = parse(input);
    let mut expected = ContextId::Sheet;
    for index in path {
        expected = child_cuts(&graph, expected)[*index];
    }
    assert_eq!(home(&graph, constant(&graph, "a")), expected);
}

#[rstest]
#[case::strict_defining("~[ ~[ (P *x) ] ]", ParseOptions::default())]
#[case::strict_declared_outside("[*x] ~[ ~[ (P x) ] ]", ParseOptions::default())]
#[case::lenient_free_name("~[ ~[ (P x) ] ]", ParseOptions::lenient())]
fn test_polarity_of_nested_cuts(#[case] input: &str, #[case] options: ParseOptions) {
    let graph = parse_egif_with(input, &options)
        .unwrap_or_else(|err| panic!("{}", err.render(input)))
        .into_graph();
    let outer = child_cuts(&graph, ContextId::Sheet)[0];
    let inner = child_cuts(&graph, outer)[0];
    assert_eq!(graph.context_depth(outer).unwrap(), 1);
    assert!(!graph.is_positive_context(outer).unwrap());
    assert_eq!(graph.context_depth(inner).unwrap(), 2);
    assert!(graph.is_positive_context(inner).unwrap());
}

#[test]
fn test_lenient_reads_free_names_as_constants() {
    let graph = parse_egif_with("(Loves John *y) ~[ (Hates John y) ]", &ParseOptions::lenient())
        .unwrap()
        .into_graph();
    let john = constant(&graph, "John");
    assert_eq!(graph.edges_using(john).len(), 2);
    assert_eq!(home(&graph, john), ContextId::Sheet);

    // Strict mode rejects the same text
    assert!(matches!(
        parse_egif("(Loves John *y)").unwrap_err(),
        ParseError::UndefinedVariable { .. }
    ));
}

#[test]
fn test_lenient_still_prefers_bindings() {
    let graph = parse_egif_with("(P *x) (Q x)", &ParseOptions::lenient())
        .unwrap()
        .into_graph();
    assert_eq!(graph.vertex_count(), 1);
    assert!(graph.vertices().all(|v| v.is_generic()));
}

#[rstest]
#[case::declaration_in_closed_cut("~[ [*x] ] (P x)")]
#[case::edge_in_sibling_cut("~[ (P *x) ] ~[ (Q x) ]")]
fn test_lenient_keeps_closed_bindings_out_of_scope(#[case] input: &str) {
    let err = parse_egif_with(input, &ParseOptions::lenient()).unwrap_err();
    assert!(
        matches!(err, ParseError::OutOfScopeVariable { ref name, .. } if name == "x"),
        "got {err:?}"
    );
}

#[test]
fn test_isolated_defining_occurrence_creates_vertex() {
    let graph = parse("*x ~[ (P x) ]");
    let vertex = graph.vertices().next().unwrap().id;
    assert_eq!(
        graph.parent_context_of(ElementId::Vertex(vertex)).unwrap(),
        ContextId::Sheet
    );
}

#[test]
fn test_alphabet() {
    let parse = parse_egif(r#"(Loves *x "Mary") ~[ (Loves x x) (Happy "Mary") ]"#).unwrap();
    let alphabet = parse.alphabet();
    assert_eq!(alphabet.constants().collect::<Vec<_>>(), vec!["Mary"]);
    assert_eq!(
        alphabet.relations().collect::<Vec<_>>(),
        vec![("Loves", 2), ("Happy", 1)]
    );
}
