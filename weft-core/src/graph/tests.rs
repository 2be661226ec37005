//! Unit tests for the graph store and its CSR view.

use proptest::prelude::*;
use rstest::rstest;

use crate::error::GraphError;
use crate::test_utils::{graph_from, suite_proptest_config, weighted_graph};

use super::{EdgeTriplets, Graph, VertexId};

fn triplets(edges: &[(usize, usize, f64)]) -> EdgeTriplets {
    EdgeTriplets::new(
        edges.iter().map(|e| e.0).collect(),
        edges.iter().map(|e| e.1).collect(),
        edges.iter().map(|e| e.2).collect(),
    )
}

#[test]
fn new_allocates_zeroed_placeholders() {
    let graph = Graph::new(3, 2).expect("sizes are consistent");
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.weights().iter().all(|&w| w == 0.0));
    assert!(graph.origins().iter().all(|id| id.index() == 0));
}

#[rstest]
#[case::no_vertices_no_edges(0, 0, true)]
#[case::isolated_vertices(5, 0, true)]
#[case::edges_without_vertices(0, 1, false)]
fn new_checks_size_consistency(
    #[case] vertex_count: usize,
    #[case] edge_count: usize,
    #[case] ok: bool,
) {
    let result = Graph::new(vertex_count, edge_count);
    assert_eq!(result.is_ok(), ok);
    if let Err(err) = result {
        assert!(matches!(err, GraphError::InvalidSize { .. }));
    }
}

#[test]
fn new_reports_unallocatable_buffers() {
    let err = Graph::new(1, usize::MAX).expect_err("allocation cannot succeed");
    assert!(matches!(
        err,
        GraphError::InvalidSize {
            edge_count: usize::MAX,
            ..
        }
    ));
}

#[test]
fn build_rejects_mismatched_buffers() {
    let bad = EdgeTriplets::new(vec![0, 1], vec![1], vec![1.0, 1.0]);
    let err = Graph::build(2, bad).expect_err("buffers differ in length");
    assert!(matches!(err, GraphError::InvalidSize { edge_count: 2, .. }));
}

#[rstest]
#[case::bad_origin(&[(4, 0, 1.0)], 4)]
#[case::bad_end(&[(0, 1, 1.0), (1, 9, 1.0)], 9)]
fn build_rejects_out_of_range_ids(#[case] edges: &[(usize, usize, f64)], #[case] index: usize) {
    let err = Graph::build(4, triplets(edges)).expect_err("id out of range");
    assert_eq!(
        err,
        GraphError::IndexOutOfRange {
            index,
            vertex_count: 4
        }
    );
}

#[rstest]
#[case::empty(&[], 0)]
#[case::max_end(&[(0, 3, 1.0)], 4)]
#[case::max_origin(&[(6, 2, 1.0), (1, 0, 1.0)], 7)]
fn build_inferred_uses_largest_endpoint(
    #[case] edges: &[(usize, usize, f64)],
    #[case] expected: usize,
) {
    let graph = Graph::build_inferred(triplets(edges)).expect("inferred size is valid");
    assert_eq!(graph.vertex_count(), expected);
}

#[test]
fn set_edge_validates_before_writing() {
    let mut graph = Graph::new(3, 1).expect("valid sizes");
    assert_eq!(
        graph.set_edge(1, 0, 1, 2.0),
        Err(GraphError::EdgeOutOfRange {
            edge: 1,
            edge_count: 1
        })
    );
    assert_eq!(
        graph.set_edge(0, 0, 3, 2.0),
        Err(GraphError::IndexOutOfRange {
            index: 3,
            vertex_count: 3
        })
    );
    assert_eq!(graph, Graph::new(3, 1).expect("valid sizes"));

    graph.set_edge(0, 2, 1, 2.5).expect("in range");
    let edge = graph.edge(0).expect("edge 0 exists");
    assert_eq!((edge.origin.index(), edge.end.index(), edge.weight), (2, 1, 2.5));
}

#[test]
fn set_weights_requires_matching_length() {
    let mut graph = graph_from(2, &[(0, 1, 1.0), (1, 0, 1.0)]);
    assert_eq!(
        graph.set_weights(&[1.0]),
        Err(GraphError::SizeMismatch {
            expected: 2,
            actual: 1
        })
    );
    graph.set_weights(&[3.0, 4.0]).expect("lengths match");
    assert_eq!(graph.weights(), &[3.0, 4.0]);
}

#[test]
fn copy_from_requires_equal_edge_counts() {
    let source = graph_from(5, &[(0, 4, 2.0), (3, 1, 1.0)]);
    let mut too_small = Graph::new(5, 1).expect("valid sizes");
    assert_eq!(
        too_small.copy_from(&source),
        Err(GraphError::SizeMismatch {
            expected: 1,
            actual: 2
        })
    );

    let mut target = Graph::new(1, 2).expect("valid sizes");
    target.copy_from(&source).expect("edge counts match");
    assert_eq!(target, source);
}

#[test]
fn resize_discards_previous_edges() {
    let mut graph = graph_from(2, &[(0, 1, 7.0)]);
    graph.resize(4, 3).expect("valid sizes");
    assert_eq!(graph, Graph::new(4, 3).expect("valid sizes"));
    assert!(graph.resize(0, 2).is_err());
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn subgraph_relabels_in_ascending_order() {
    let graph = graph_from(
        5,
        &[(0, 1, 1.0), (1, 3, 2.0), (3, 4, 3.0), (4, 1, 4.0), (2, 2, 5.0)],
    );
    let sub = graph.subgraph(&[4, 1, 3, 1]).expect("ids in range");
    assert_eq!(sub.vertex_count(), 3);
    assert_eq!(
        sub.to_triplets(),
        triplets(&[(0, 1, 2.0), (1, 2, 3.0), (2, 0, 4.0)])
    );
}

#[test]
fn subgraph_rejects_unknown_vertices() {
    let graph = graph_from(3, &[(0, 1, 1.0)]);
    assert_eq!(
        graph.subgraph(&[0, 3]),
        Err(GraphError::IndexOutOfRange {
            index: 3,
            vertex_count: 3
        })
    );
}

#[test]
fn extract_subgraph_checks_mask_length() {
    let graph = graph_from(3, &[(0, 1, 1.0)]);
    assert_eq!(
        graph.extract_subgraph(&[true, false]),
        Err(GraphError::SizeMismatch {
            expected: 3,
            actual: 2
        })
    );
    let empty = graph
        .extract_subgraph(&[false, false, false])
        .expect("mask matches");
    assert_eq!(empty.vertex_count(), 0);
    assert_eq!(empty.edge_count(), 0);
}

#[test]
fn degrees_count_edge_endpoints() {
    let graph = graph_from(3, &[(0, 1, 1.0), (0, 2, 1.0), (2, 1, 1.0), (1, 1, 1.0)]);
    assert_eq!(graph.out_degrees(), vec![2, 1, 1]);
    assert_eq!(graph.in_degrees(), vec![0, 3, 1]);
}

#[test]
fn neighbor_list_groups_by_origin_and_keeps_order() {
    let graph = graph_from(
        4,
        &[(3, 0, 1.0), (1, 2, 2.0), (3, 2, 3.0), (1, 0, 4.0), (3, 1, 5.0)],
    );
    let csr = graph.neighbor_list();
    assert_eq!(csr.offsets(), &[0, 0, 2, 2, 5]);
    let v3 = graph.vertex(3).expect("vertex exists");
    let ends: Vec<_> = csr.neighbors(v3).iter().map(|id| id.index()).collect();
    assert_eq!(ends, vec![0, 2, 1]);
    assert_eq!(csr.weights(v3), &[1.0, 3.0, 5.0]);
    assert!(csr.neighbors(VertexId::new_unchecked(17)).is_empty());
}

#[test]
fn neighbor_list_does_not_alias_source() {
    let mut graph = graph_from(2, &[(0, 1, 1.0)]);
    let csr = graph.neighbor_list();
    graph.weights_mut()[0] = 9.0;
    assert_eq!(csr.weights(VertexId::new_unchecked(0)), &[1.0]);
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn triplets_round_trip_exactly(graph in weighted_graph(12, 40)) {
        let rebuilt = Graph::build(graph.vertex_count(), graph.to_triplets())
            .expect("exported triplets are valid");
        prop_assert_eq!(&rebuilt, &graph);
        let owned = graph.clone().into_triplets();
        prop_assert_eq!(owned, graph.to_triplets());
    }

    #[test]
    fn neighbor_list_offsets_partition_edges(graph in weighted_graph(12, 40)) {
        let csr = graph.neighbor_list();
        let offsets = csr.offsets();
        prop_assert_eq!(offsets.len(), graph.vertex_count() + 1);
        prop_assert_eq!(offsets[0], 0);
        prop_assert_eq!(offsets[graph.vertex_count()], graph.edge_count());
        prop_assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
        for (v, degree) in graph.out_degrees().into_iter().enumerate() {
            prop_assert_eq!(offsets[v + 1] - offsets[v], degree);
        }
    }

    #[test]
    fn subgraph_keeps_exactly_induced_edges(
        graph in weighted_graph(10, 30),
        seed in any::<u64>(),
    ) {
        let mask: Vec<bool> = (0..graph.vertex_count())
            .map(|v| (seed >> (v % 64)) & 1 == 1)
            .collect();
        let sub = graph.extract_subgraph(&mask).expect("mask matches");
        let induced = graph
            .edges()
            .filter(|e| mask[e.origin.index()] && mask[e.end.index()])
            .count();
        prop_assert_eq!(sub.edge_count(), induced);
        prop_assert_eq!(sub.vertex_count(), mask.iter().filter(|&&keep| keep).count());
        prop_assert!(sub
            .edges()
            .all(|e| e.origin.index() < sub.vertex_count() && e.end.index() < sub.vertex_count()));
    }
}
