//! Weft core library: a sparse edge-triplet graph store and the algorithms
//! that build and analyse it.
//!
//! Graphs come from point clouds ([`knn_graph`], [`eps_graph`] and their
//! cross-set variants), integer lattices ([`grid_graph`]) or spanning trees
//! ([`minimum_spanning_tree`], [`skeleton`]), or are imported directly from
//! [`EdgeTriplets`]. They are analysed with connected components, the
//! Dijkstra family (including repeated-Dijkstra geodesic matrices and
//! Voronoi labelling), weight normalisation and replicator-dynamics clique
//! extraction.
//!
//! Every operation is synchronous and single-threaded, works on caller-owned
//! values and reports failures as [`GraphError`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cliques;
mod components;
mod error;
mod graph;
mod matrix;
mod metric;
mod mst;
mod normalize;
mod shortest_path;
mod telemetry;
mod union_find;

#[cfg(test)]
mod test_utils;

pub use crate::{
    cliques::{CliqueLabels, ReplicatorBuilder, ReplicatorDynamics, clique_labels},
    components::{ComponentLabels, connected_components},
    error::{GraphError, GraphErrorCode, Result},
    graph::{Edge, EdgeTriplets, Graph, NeighborList, VertexId},
    matrix::Matrix,
    metric::{
        GridConnectivity, cross_eps_graph, cross_eps_robust_graph, cross_knn_graph, eps_graph,
        grid_graph, knn_graph,
    },
    mst::{SpanningForest, minimum_spanning_tree, skeleton},
    normalize::{
        Normalization, NormalizationSums, SymmetricSums, normalize, normalize_columns,
        normalize_rows, normalize_symmetric,
    },
    shortest_path::{
        dijkstra, dijkstra_multiseed, dijkstra_unchecked, floyd, floyd_partial, voronoi,
    },
};
