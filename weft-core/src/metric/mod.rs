//! Graph construction from point clouds and integer lattices.
//!
//! Point-cloud builders take a [`Matrix`](crate::Matrix) holding one point
//! per row and weight every edge by the Euclidean distance between its
//! endpoints. Cross-set builders connect rows of a query cloud `X` to rows
//! of a target cloud `Y`; their graphs have `max(|X|, |Y|)` vertices so that
//! origins index `X` and ends index `Y` within one id space.

mod distance;
mod eps;
mod grid;
mod knn;

pub(crate) use self::distance::pair_distance;
pub use self::eps::{cross_eps_graph, cross_eps_robust_graph, eps_graph};
pub use self::grid::{GridConnectivity, grid_graph};
pub use self::knn::{cross_knn_graph, knn_graph};

use tracing::debug;

use crate::graph::{Graph, VertexId};
use crate::telemetry;

/// Accumulates builder output before it is frozen into a [`Graph`].
#[derive(Debug, Default)]
struct EdgeSink {
    origins: Vec<VertexId>,
    ends: Vec<VertexId>,
    weights: Vec<f64>,
}

impl EdgeSink {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            origins: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
        }
    }

    /// Callers guarantee both ids lie below the final vertex count.
    fn push(&mut self, origin: usize, end: usize, weight: f64) {
        self.origins.push(VertexId::new_unchecked(origin));
        self.ends.push(VertexId::new_unchecked(end));
        self.weights.push(weight);
    }

    fn finish(self, builder: &'static str, vertex_count: usize) -> Graph {
        let edges = self.weights.len();
        telemetry::record_edges_built(builder, edges);
        debug!(builder, vertices = vertex_count, edges, "graph built");
        Graph::from_parts(vertex_count, self.origins, self.ends, self.weights)
    }
}
