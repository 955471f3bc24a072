//! MST Behavioral Tests - BDD Style
//!
//! Following BDD naming convention: given_<context>_when_<action>_then_<outcome>

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::expect_used)]

use spanstep_graph::{Algorithm, Edge, Error, GraphModel, compute_mst, compute_mst_with};

fn triangle() -> GraphModel {
    GraphModel::from_edges(3, [(0, 1, 4), (1, 2, 2), (0, 2, 9)]).expect("triangle should build")
}

/// Six-node chain plus chords, the shape graph suppliers typically hand over.
fn chain_with_chords() -> GraphModel {
    GraphModel::from_edges(
        6,
        [
            (0, 1, 7),
            (1, 2, 3),
            (2, 3, 12),
            (3, 4, 5),
            (4, 5, 9),
            (0, 3, 6),
            (1, 4, 11),
            (2, 5, 4),
        ],
    )
    .expect("chain should build")
}

// ============================================================================
// GRAPH CONSTRUCTION
// ============================================================================

#[test]
fn given_rejected_edge_when_added_then_graph_is_unchanged() {
    // GIVEN: A graph with one edge
    let mut graph = GraphModel::from_edges(3, [(0, 1, 2)]).unwrap();
    let before = graph.edges();

    // WHEN: Invalid edges are offered
    let results = [
        graph.add_edge(2, 2, 1),
        graph.add_edge(1, 0, 8),
        graph.add_edge(1, 2, 0),
        graph.add_edge(1, 5, 3),
    ];

    // THEN: Each is reported distinctly and nothing changed
    assert!(matches!(results[0], Err(Error::InvalidEdge { .. })));
    assert!(matches!(results[1], Err(Error::DuplicateEdge { .. })));
    assert!(matches!(results[2], Err(Error::InvalidWeight { .. })));
    assert!(matches!(results[3], Err(Error::NodeNotFound { id: 5 })));
    assert_eq!(graph.edges(), before);
}

// ============================================================================
// COMPUTATION
// ============================================================================

#[test]
fn given_triangle_when_computed_with_both_algorithms_then_same_edges_different_order() {
    // GIVEN: Nodes {0,1,2} with edges (0,1,4), (1,2,2), (0,2,9)
    let graph = triangle();

    // WHEN: Both algorithms run
    let prim = compute_mst(&graph, Algorithm::Prim).unwrap();
    let kruskal = compute_mst(&graph, Algorithm::Kruskal).unwrap();

    // THEN: Both select {(1,2,2), (0,1,4)} for a total of 6
    assert_eq!(prim.total_weight(), 6);
    assert_eq!(kruskal.total_weight(), 6);
    for result in [&prim, &kruskal] {
        let mut pairs: Vec<_> = result.iter().map(Edge::endpoints).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    }

    // AND: Kruskal is ascending, Prim follows the frontier from node 0
    assert_eq!(kruskal.edges(), &[Edge::new(1, 2, 2), Edge::new(0, 1, 4)]);
    assert_eq!(prim.edges(), &[Edge::new(0, 1, 4), Edge::new(1, 2, 2)]);
}

#[test]
fn given_two_components_when_computed_then_disconnected_error_for_both() {
    // GIVEN: Nodes {0,1,2,3}, edges {(0,1,5), (2,3,5)}
    let graph = GraphModel::from_edges(4, [(0, 1, 5), (2, 3, 5)]).unwrap();

    // WHEN / THEN: Neither algorithm produces a result
    for algorithm in Algorithm::ALL {
        let result = compute_mst(&graph, algorithm);
        assert!(
            matches!(result, Err(Error::DisconnectedGraph { components: 2, .. })),
            "{algorithm} should reject a disconnected graph"
        );
    }
}

#[test]
fn given_chain_when_computed_then_tree_has_n_minus_one_edges_and_equal_weight() {
    let graph = chain_with_chords();

    let prim = compute_mst(&graph, Algorithm::Prim).unwrap();
    let kruskal = compute_mst(&graph, Algorithm::Kruskal).unwrap();

    assert_eq!(prim.len(), graph.node_count() - 1);
    assert_eq!(kruskal.len(), graph.node_count() - 1);
    assert_eq!(prim.total_weight(), kruskal.total_weight());
    assert_eq!(kruskal.total_weight(), 3 + 4 + 5 + 6 + 7);
}

#[test]
fn given_same_graph_when_computed_twice_then_edge_order_is_identical() {
    let graph = chain_with_chords();

    for algorithm in Algorithm::ALL {
        let first = compute_mst(&graph, algorithm).unwrap();
        let second = compute_mst(&graph, algorithm).unwrap();
        assert_eq!(first.edges(), second.edges(), "{algorithm} must be deterministic");
    }
}

#[test]
fn given_prim_from_each_node_when_computed_then_weight_is_invariant() {
    let graph = chain_with_chords();
    let expected = compute_mst(&graph, Algorithm::Kruskal).unwrap().total_weight();

    for start in graph.nodes() {
        let result = compute_mst_with(&graph, Algorithm::Prim, Some(start)).unwrap();
        assert_eq!(result.total_weight(), expected, "start node {start}");
        assert!(
            result.edges().first().is_some_and(|edge| edge.other(start).is_some()),
            "first Prim edge must touch the start node {start}"
        );
    }
}

#[test]
fn given_result_when_serialized_then_order_and_total_are_kept() {
    let result = compute_mst(&triangle(), Algorithm::Kruskal).unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["algorithm"], "kruskal");
    assert_eq!(json["total_weight"], 6);
    assert_eq!(json["edges"][0]["a"], 1);
    assert_eq!(json["edges"][0]["b"], 2);
    assert_eq!(json["edges"][1]["weight"], 4);
}
