//! Brute-force k-nearest-neighbour graphs.

use tracing::{instrument, warn};

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::matrix::Matrix;

use super::distance::{euclidean, k_nearest, pair_distance, validate_cross};
use super::EdgeSink;

/// Builds the symmetric k-nearest-neighbour graph of a point cloud.
///
/// Every point is linked to its `k` nearest other points (lower index wins
/// on equal distance) and every such edge is mirrored. Edges are emitted
/// sorted by `(origin, end)` without duplicates or self-loops, so the graph
/// holds between `k * n` and `2 * k * n` edges.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] unless `1 <= k < n` (clouds with
/// fewer than two points yield an edgeless graph) and
/// [`GraphError::NonFiniteCoordinate`] for NaN or infinite coordinates.
///
/// # Examples
/// ```
/// use weft_core::{Matrix, knn_graph};
///
/// let points = Matrix::from_rows(&[[0.0], [1.0], [3.0]])?;
/// let graph = knn_graph(&points, 1)?;
/// let pairs: Vec<_> = graph
///     .edges()
///     .map(|e| (e.origin.index(), e.end.index(), e.weight))
///     .collect();
/// assert_eq!(pairs, vec![(0, 1, 1.0), (1, 0, 1.0), (1, 2, 2.0), (2, 1, 2.0)]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "metric.knn",
    err,
    skip(points),
    fields(points = points.rows(), dims = points.cols(), k = k),
)]
pub fn knn_graph(points: &Matrix, k: usize) -> Result<Graph> {
    points.ensure_finite()?;
    let n = points.rows();
    if n < 2 {
        warn!(points = n, "too few points for neighbours; graph is edgeless");
        return Ok(EdgeSink::default().finish("knn", n));
    }
    if k == 0 || k >= n {
        return Err(GraphError::invalid_parameter(
            "k",
            format!("must satisfy 1 <= k < {n}, got {k}"),
        ));
    }

    let mut pairs = Vec::with_capacity(n.saturating_mul(k).saturating_mul(2));
    let mut nearest = Vec::with_capacity(n);
    for i in 0..n {
        k_nearest(points.row(i), points, Some(i), k, &mut nearest);
        for candidate in &nearest {
            pairs.push((i, candidate.index));
            pairs.push((candidate.index, i));
        }
    }
    pairs.sort_unstable();
    pairs.dedup();

    let mut sink = EdgeSink::with_capacity(pairs.len());
    for (origin, end) in pairs {
        sink.push(origin, end, pair_distance(points, origin, end));
    }
    Ok(sink.finish("knn", n))
}

/// Links every row of `queries` to its `k` nearest rows of `targets`.
///
/// Each query contributes exactly `k` edges in ascending `(distance, index)`
/// order. The graph has `max(|queries|, |targets|)` vertices.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] unless `1 <= k <= |targets|`,
/// [`GraphError::DimensionMismatch`] when the clouds differ in column count
/// and [`GraphError::NonFiniteCoordinate`] for NaN or infinite coordinates.
#[instrument(
    name = "metric.cross_knn",
    err,
    skip(queries, targets),
    fields(queries = queries.rows(), targets = targets.rows(), k = k),
)]
pub fn cross_knn_graph(queries: &Matrix, targets: &Matrix, k: usize) -> Result<Graph> {
    if k == 0 || k > targets.rows() {
        return Err(GraphError::invalid_parameter(
            "k",
            format!("must satisfy 1 <= k <= {}, got {k}", targets.rows()),
        ));
    }
    validate_cross(queries, targets)?;

    let mut sink = EdgeSink::with_capacity(queries.rows().saturating_mul(k));
    let mut nearest = Vec::with_capacity(targets.rows());
    for (i, query) in queries.iter_rows().enumerate() {
        k_nearest(query, targets, None, k, &mut nearest);
        for candidate in &nearest {
            sink.push(i, candidate.index, euclidean(query, targets.row(candidate.index)));
        }
    }
    Ok(sink.finish("cross_knn", queries.rows().max(targets.rows())))
}
