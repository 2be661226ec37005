//! Shared test utilities for `weft-core`.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use weft_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{EdgeTriplets, Graph, Matrix};

/// Builds a proptest configuration from the shared CI profile so every
/// property suite honours `PROGTEST_CASES` and `WEFT_PBT_FORK` alike.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph from `(origin, end, weight)` tuples.
pub(crate) fn graph_from(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Graph {
    let triplets = EdgeTriplets::new(
        edges.iter().map(|&(origin, _, _)| origin).collect(),
        edges.iter().map(|&(_, end, _)| end).collect(),
        edges.iter().map(|&(_, _, weight)| weight).collect(),
    );
    Graph::build(vertex_count, triplets).expect("test edges must be in range")
}

/// Adds the reverse of every edge.
pub(crate) fn symmetric_graph(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Graph {
    let both: Vec<_> = edges
        .iter()
        .flat_map(|&(origin, end, weight)| [(origin, end, weight), (end, origin, weight)])
        .collect();
    graph_from(vertex_count, &both)
}

/// Undirected path `0 - 1 - ... - (n-1)` with unit weights.
pub(crate) fn path_graph(vertex_count: usize) -> Graph {
    let edges: Vec<_> = (1..vertex_count).map(|v| (v - 1, v, 1.0)).collect();
    symmetric_graph(vertex_count, &edges)
}

/// Two disjoint unit-weight triangles `{0, 1, 2}` and `{3, 4, 5}`.
pub(crate) fn two_triangles() -> Graph {
    symmetric_graph(
        6,
        &[
            (0, 1, 1.0),
            (1, 2, 1.0),
            (0, 2, 1.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
            (3, 5, 1.0),
        ],
    )
}

/// Returns whether every edge has a reverse edge of equal weight.
pub(crate) fn is_symmetric(graph: &Graph) -> bool {
    let mut forward: Vec<_> = graph
        .edges()
        .map(|edge| (edge.origin.index(), edge.end.index(), edge.weight.to_bits()))
        .collect();
    let mut reversed: Vec<_> = forward
        .iter()
        .map(|&(origin, end, weight)| (end, origin, weight))
        .collect();
    forward.sort_unstable();
    reversed.sort_unstable();
    forward == reversed
}

/// Strategy producing point clouds with `rows` points in `dims` dimensions.
pub(crate) fn point_cloud(
    rows: std::ops::RangeInclusive<usize>,
    dims: usize,
) -> impl Strategy<Value = Matrix> {
    rows.prop_flat_map(move |n| {
        prop::collection::vec(-100.0_f64..100.0, n * dims)
            .prop_map(move |data| Matrix::new(n, dims, data).expect("shape matches length"))
    })
}

/// Strategy producing small directed graphs with non-negative weights.
pub(crate) fn weighted_graph(
    max_vertices: usize,
    max_edges: usize,
) -> impl Strategy<Value = Graph> {
    (1..=max_vertices).prop_flat_map(move |n| {
        prop::collection::vec((0..n, 0..n, 0.0_f64..10.0), 0..=max_edges)
            .prop_map(move |edges| graph_from(n, &edges))
    })
}
