use dagcore::{compute_fn, Graph, GraphError, Value};
use dagruntime::plan;

fn graph_of(names: &[&str]) -> Graph {
    let mut graph = Graph::new();
    for name in names {
        graph
            .add_node(*name, compute_fn(|_| Ok(Value::Null)))
            .unwrap();
    }
    graph
}

#[test]
fn test_linear_chain_yields_one_wave_per_node() {
    let mut graph = graph_of(&["input", "process", "output"]);
    graph.add_edge("input", "process");
    graph.add_edge("process", "output");

    let plan = plan(&graph).unwrap();
    assert_eq!(
        plan.waves(),
        &[
            vec!["input".to_string()],
            vec!["process".to_string()],
            vec!["output".to_string()],
        ]
    );
}

#[test]
fn test_diamond_waves() {
    let mut graph = graph_of(&["input", "double", "triple", "sum"]);
    graph.add_edge("input", "double");
    graph.add_edge("input", "triple");
    graph.add_edge("double", "sum");
    graph.add_edge("triple", "sum");

    let plan = plan(&graph).unwrap();
    assert_eq!(plan.wave_count(), 3);
    assert_eq!(plan.waves()[0], vec!["input".to_string()]);
    assert_eq!(
        plan.waves()[1],
        vec!["double".to_string(), "triple".to_string()]
    );
    assert_eq!(plan.waves()[2], vec!["sum".to_string()]);
}

#[test]
fn test_isolated_nodes_land_in_wave_zero_in_registration_order() {
    let graph = graph_of(&["zeta", "alpha", "mu"]);

    let plan = plan(&graph).unwrap();
    assert_eq!(
        plan.waves(),
        &[vec![
            "zeta".to_string(),
            "alpha".to_string(),
            "mu".to_string(),
        ]]
    );
}

#[test]
fn test_duplicate_edges_are_harmless() {
    let mut graph = graph_of(&["a", "b"]);
    graph.add_edge("a", "b");
    graph.add_edge("a", "b");
    graph.add_edge("a", "b");

    let plan = plan(&graph).unwrap();
    assert_eq!(
        plan.waves(),
        &[vec!["a".to_string()], vec!["b".to_string()]]
    );
}

#[test]
fn test_missing_source_reported_in_declaration_order() {
    let mut graph = graph_of(&["a"]);
    graph.add_edge("ghost", "a");
    graph.add_edge("a", "phantom");

    let err = plan(&graph).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingSource {
            from: "ghost".to_string(),
            to: "a".to_string(),
        }
    );
    assert!(err.to_string().contains("non-existent source node"));
}

#[test]
fn test_missing_target() {
    let mut graph = graph_of(&["exists"]);
    graph.add_edge("exists", "doesNotExist");

    let err = plan(&graph).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingTarget {
            from: "exists".to_string(),
            to: "doesNotExist".to_string(),
        }
    );
    assert!(err.to_string().contains("non-existent target node"));
}

#[test]
fn test_cycle_detected() {
    let mut graph = graph_of(&["a", "b", "c"]);
    graph.add_edge("a", "b");
    graph.add_edge("b", "c");
    graph.add_edge("c", "a");

    let err = plan(&graph).unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { remaining: 3 }));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn test_self_loop_is_a_cycle() {
    let mut graph = graph_of(&["loner"]);
    graph.add_edge("loner", "loner");

    let err = plan(&graph).unwrap_err();
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn test_cycle_in_a_branch_fails_the_whole_plan() {
    // "head" is schedulable on its own, but the b <-> c knot never unwinds
    let mut graph = graph_of(&["head", "b", "c"]);
    graph.add_edge("head", "b");
    graph.add_edge("b", "c");
    graph.add_edge("c", "b");

    let err = plan(&graph).unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { remaining: 2 }));
}

#[test]
fn test_empty_graph_has_no_waves() {
    let graph = Graph::new();
    let plan = plan(&graph).unwrap();
    assert_eq!(plan.wave_count(), 0);
    assert_eq!(plan.node_count(), 0);
}
