//! In-place edge-weight normalisation.
//!
//! Every routine rescales the weight buffer of a [`Graph`] and leaves its
//! topology untouched. Vertices whose weight sum is exactly zero keep their
//! weights; this is a policy, not an error.

use tracing::{debug, instrument};

use crate::graph::{Graph, VertexId};

/// Normalisation mode accepted by [`normalize`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Normalization {
    /// Outgoing weights of every vertex sum to one.
    Rows,
    /// Incoming weights of every vertex sum to one.
    Columns,
    /// Each weight is divided by `sqrt(row_sum[origin] * column_sum[end])`.
    Symmetric,
}

/// Row and column sums measured before symmetric normalisation.
#[derive(Clone, Debug, PartialEq)]
pub struct SymmetricSums {
    /// Outgoing weight sum per vertex.
    pub rows: Vec<f64>,
    /// Incoming weight sum per vertex.
    pub columns: Vec<f64>,
}

/// Sums returned by [`normalize`], tagged by mode.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizationSums {
    /// Outgoing sums from [`normalize_rows`].
    Rows(Vec<f64>),
    /// Incoming sums from [`normalize_columns`].
    Columns(Vec<f64>),
    /// Both sums from [`normalize_symmetric`].
    Symmetric(SymmetricSums),
}

/// Applies the normalisation selected by `mode`.
#[instrument(
    name = "normalize.dispatch",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn normalize(graph: &mut Graph, mode: Normalization) -> NormalizationSums {
    match mode {
        Normalization::Rows => NormalizationSums::Rows(normalize_rows(graph)),
        Normalization::Columns => NormalizationSums::Columns(normalize_columns(graph)),
        Normalization::Symmetric => NormalizationSums::Symmetric(normalize_symmetric(graph)),
    }
}

/// Rescales outgoing weights so each vertex's sum is one.
///
/// Returns the sums measured before rescaling.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, normalize_rows};
///
/// let mut graph = Graph::build(
///     3,
///     EdgeTriplets::new(vec![0, 0, 1], vec![1, 2, 2], vec![1.0, 3.0, 0.0]),
/// )?;
/// let sums = normalize_rows(&mut graph);
/// assert_eq!(sums, vec![4.0, 0.0, 0.0]);
/// assert_eq!(graph.weights(), &[0.25, 0.75, 0.0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "normalize.rows",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn normalize_rows(graph: &mut Graph) -> Vec<f64> {
    let sums = endpoint_sums(graph.vertex_count(), graph.origins(), graph.weights());
    let origins = graph.origins().to_vec();
    scale_by(graph.weights_mut(), &origins, &sums);
    sums
}

/// Rescales incoming weights so each vertex's sum is one.
///
/// Returns the sums measured before rescaling.
#[instrument(
    name = "normalize.columns",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn normalize_columns(graph: &mut Graph) -> Vec<f64> {
    let sums = endpoint_sums(graph.vertex_count(), graph.ends(), graph.weights());
    let ends = graph.ends().to_vec();
    scale_by(graph.weights_mut(), &ends, &sums);
    sums
}

/// Divides each weight by the geometric mean of its origin's row sum and
/// its end's column sum.
///
/// Edges whose sum product is not positive keep their weight.
#[instrument(
    name = "normalize.symmetric",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn normalize_symmetric(graph: &mut Graph) -> SymmetricSums {
    let rows = endpoint_sums(graph.vertex_count(), graph.origins(), graph.weights());
    let columns = endpoint_sums(graph.vertex_count(), graph.ends(), graph.weights());
    let (origins, ends) = (graph.origins().to_vec(), graph.ends().to_vec());

    let mut skipped = 0_usize;
    for ((weight, origin), end) in graph.weights_mut().iter_mut().zip(&origins).zip(&ends) {
        let product = rows[origin.index()] * columns[end.index()];
        if product > 0.0 {
            *weight /= product.sqrt();
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        debug!(skipped, "edges with a non-positive sum product left untouched");
    }
    SymmetricSums { rows, columns }
}

fn endpoint_sums(vertex_count: usize, endpoints: &[VertexId], weights: &[f64]) -> Vec<f64> {
    let mut sums = vec![0.0; vertex_count];
    for (endpoint, &weight) in endpoints.iter().zip(weights) {
        sums[endpoint.index()] += weight;
    }
    sums
}

fn scale_by(weights: &mut [f64], endpoints: &[VertexId], sums: &[f64]) {
    let mut untouched = 0_usize;
    for (weight, endpoint) in weights.iter_mut().zip(endpoints) {
        let sum = sums[endpoint.index()];
        if sum == 0.0 {
            untouched += 1;
        } else {
            *weight /= sum;
        }
    }
    if untouched > 0 {
        debug!(untouched, "edges on zero-sum vertices left untouched");
    }
}
