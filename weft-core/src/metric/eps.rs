//! Epsilon-ball neighbour graphs.

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::matrix::Matrix;

use super::distance::{Candidate, euclidean, pair_distance, squared_euclidean, validate_cross};
use super::EdgeSink;

fn validate_radius(eps: f64) -> Result<()> {
    if eps >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::invalid_parameter(
            "eps",
            format!("must be a non-negative radius, got {eps}"),
        ))
    }
}

/// Links every ordered pair of distinct points no further than `eps` apart.
///
/// # Errors
/// Returns [`GraphError::InvalidParameter`] when `eps` is negative or NaN
/// and [`GraphError::NonFiniteCoordinate`] for NaN or infinite coordinates.
///
/// # Examples
/// ```
/// use weft_core::{Matrix, eps_graph};
///
/// let points = Matrix::from_rows(&[[0.0, 0.0], [0.0, 1.0], [5.0, 5.0]])?;
/// let graph = eps_graph(&points, 1.0)?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.out_degrees(), vec![1, 1, 0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "metric.eps",
    err,
    skip(points),
    fields(points = points.rows(), dims = points.cols(), eps = eps),
)]
pub fn eps_graph(points: &Matrix, eps: f64) -> Result<Graph> {
    validate_radius(eps)?;
    points.ensure_finite()?;

    let n = points.rows();
    let mut sink = EdgeSink::default();
    for i in 0..n {
        for j in (0..n).filter(|&j| j != i) {
            let distance = pair_distance(points, i, j);
            if distance <= eps {
                sink.push(i, j, distance);
            }
        }
    }
    Ok(sink.finish("eps", n))
}

/// Links every row of `queries` to every row of `targets` within `eps`.
///
/// # Errors
/// As [`eps_graph`], plus [`GraphError::DimensionMismatch`] when the clouds
/// differ in column count.
#[instrument(
    name = "metric.cross_eps",
    err,
    skip(queries, targets),
    fields(queries = queries.rows(), targets = targets.rows(), eps = eps),
)]
pub fn cross_eps_graph(queries: &Matrix, targets: &Matrix, eps: f64) -> Result<Graph> {
    cross_eps(queries, targets, eps, false)
}

/// As [`cross_eps_graph`], but a query with no target inside `eps` is linked
/// to its single nearest target instead (lowest index on equal distance).
///
/// Every query therefore has at least one edge whenever `targets` is
/// non-empty.
///
/// # Errors
/// As [`cross_eps_graph`].
///
/// # Examples
/// ```
/// use weft_core::{Matrix, cross_eps_robust_graph};
///
/// let queries = Matrix::from_rows(&[[0.0], [10.0]])?;
/// let targets = Matrix::from_rows(&[[0.5], [4.0], [16.0]])?;
/// let graph = cross_eps_robust_graph(&queries, &targets, 1.0)?;
/// let pairs: Vec<_> = graph.edges().map(|e| (e.origin.index(), e.end.index())).collect();
/// assert_eq!(pairs, vec![(0, 0), (1, 1)]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "metric.cross_eps_robust",
    err,
    skip(queries, targets),
    fields(queries = queries.rows(), targets = targets.rows(), eps = eps),
)]
pub fn cross_eps_robust_graph(queries: &Matrix, targets: &Matrix, eps: f64) -> Result<Graph> {
    cross_eps(queries, targets, eps, true)
}

fn cross_eps(queries: &Matrix, targets: &Matrix, eps: f64, robust: bool) -> Result<Graph> {
    validate_radius(eps)?;
    validate_cross(queries, targets)?;

    let builder = if robust { "cross_eps_robust" } else { "cross_eps" };
    let mut sink = EdgeSink::default();
    let mut fallbacks = 0_usize;
    for (i, query) in queries.iter_rows().enumerate() {
        let mut nearest: Option<Candidate> = None;
        let mut linked = false;
        for (j, target) in targets.iter_rows().enumerate() {
            let distance = euclidean(query, target);
            if distance <= eps {
                sink.push(i, j, distance);
                linked = true;
            } else if robust {
                let candidate = Candidate {
                    squared: squared_euclidean(query, target),
                    index: j,
                };
                if nearest.is_none_or(|best| candidate.cmp_key(&best).is_lt()) {
                    nearest = Some(candidate);
                }
            }
        }
        if let (false, Some(best)) = (linked, nearest) {
            sink.push(i, best.index, euclidean(query, targets.row(best.index)));
            fallbacks += 1;
        }
    }
    if robust {
        debug!(fallbacks, "queries linked to their nearest target");
    }
    Ok(sink.finish(builder, queries.rows().max(targets.rows())))
}
