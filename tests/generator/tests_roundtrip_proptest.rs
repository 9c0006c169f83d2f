//! Property-based round trip: random graphs built through the constructors
//! are generated, reparsed and compared structurally.

use arisbe::{ContextId, GenerateOptions, Generator, Graph, Vertex, VertexId, parse_egif};
use proptest::prelude::*;

use crate::helpers::graph_assertions::{constant_names, counts, edge_depths, edge_shapes, nu_patterns};

#[derive(Debug, Clone)]
enum Step {
    Generic { ctx: usize },
    Constant { ctx: usize },
    Edge { ctx: usize, args: Vec<usize>, relation: u8 },
    Cut { ctx: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<usize>().prop_map(|ctx| Step::Generic { ctx }),
        1 => any::<usize>().prop_map(|ctx| Step::Constant { ctx }),
        4 => (any::<usize>(), prop::collection::vec(any::<usize>(), 0..4), 0u8..3)
            .prop_map(|(ctx, args, relation)| Step::Edge { ctx, args, relation }),
        2 => any::<usize>().prop_map(|ctx| Step::Cut { ctx }),
    ]
}

/// Build a graph whose constants have distinct names and whose relation
/// names carry their arity, so reparsing can neither merge constants nor
/// report an arity conflict.
fn build(steps: &[Step]) -> Graph {
    let mut graph = Graph::new();
    for step in steps {
        let contexts: Vec<ContextId> = graph.contexts().collect();
        let vertices: Vec<VertexId> = graph.vertices().map(|v| v.id).collect();
        let ctx_of = |i: usize| contexts[i % contexts.len()];
        let next = match step {
            Step::Generic { ctx } => {
                graph.add_vertex_in_context(Vertex::generic(graph.fresh_vertex_id()), ctx_of(*ctx))
            }
            Step::Constant { ctx } => {
                let id = graph.fresh_vertex_id();
                graph.add_vertex_in_context(Vertex::constant(id, format!("k{}", id.raw())), ctx_of(*ctx))
            }
            Step::Edge { ctx, args, relation } => {
                if vertices.is_empty() && !args.is_empty() {
                    continue;
                }
                let args: Vec<VertexId> = args.iter().map(|i| vertices[i % vertices.len()]).collect();
                let name = format!("R{}_{}", args.len(), relation);
                graph.add_edge(graph.fresh_edge_id(), &args, name, ctx_of(*ctx))
            }
            Step::Cut { ctx } => graph.add_cut(graph.fresh_cut_id(), ctx_of(*ctx)),
        };
        if let Ok(next) = next {
            graph = next;
        }
    }
    graph
}

fn check_round_trip(original: &Graph, options: GenerateOptions) -> Result<(), TestCaseError> {
    let text = Generator::new(options).generate(original).unwrap();
    let reparsed = parse_egif(&text);
    prop_assert!(reparsed.is_ok(), "generated text failed to parse: {:?}", text);
    if let Ok(parse) = reparsed {
        let reparsed = parse.graph();
        prop_assert_eq!(counts(original), counts(reparsed));
        prop_assert_eq!(edge_shapes(original), edge_shapes(reparsed));
        prop_assert_eq!(nu_patterns(original), nu_patterns(reparsed));
        prop_assert_eq!(edge_depths(original), edge_depths(reparsed));
        prop_assert_eq!(constant_names(original), constant_names(reparsed));
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_generated_text_reparses_to_same_shape(steps in prop::collection::vec(step_strategy(), 0..50)) {
        let graph = build(&steps);
        check_round_trip(&graph, GenerateOptions::compact())?;
    }

    #[test]
    fn test_indented_text_reparses_to_same_shape(steps in prop::collection::vec(step_strategy(), 0..30)) {
        let graph = build(&steps);
        check_round_trip(&graph, GenerateOptions::indented())?;
    }

    #[test]
    fn test_second_round_trip_is_stable(steps in prop::collection::vec(step_strategy(), 0..30)) {
        let graph = build(&steps);
        let first = parse_egif(&arisbe::generate_egif(&graph).unwrap()).unwrap().into_graph();
        let second = parse_egif(&arisbe::generate_egif(&first).unwrap()).unwrap().into_graph();
        prop_assert_eq!(counts(&first), counts(&second));
        prop_assert_eq!(nu_patterns(&first), nu_patterns(&second));
        prop_assert_eq!(edge_depths(&first), edge_depths(&second));
    }
}
