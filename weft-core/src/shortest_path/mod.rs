//! Shortest-path family: single and multi-seed Dijkstra, repeated-Dijkstra
//! geodesic matrices and Voronoi labelling.
//!
//! Every routine validates its input before the first relaxation: seeds
//! must be vertices of the graph and, except for [`dijkstra_unchecked`],
//! weights must be non-negative and not NaN. Vertices the traversal never
//! reaches receive the caller's `unreached` sentinel (typically
//! `f64::INFINITY`).

mod frontier;

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::matrix::Matrix;

use self::frontier::settle;

fn check_seed(graph: &Graph, seed: usize) -> Result<()> {
    if seed < graph.vertex_count() {
        Ok(())
    } else {
        Err(GraphError::SeedOutOfRange {
            seed,
            vertex_count: graph.vertex_count(),
        })
    }
}

fn check_seeds(graph: &Graph, seeds: &[usize]) -> Result<()> {
    seeds.iter().try_for_each(|&seed| check_seed(graph, seed))
}

/// Rejects NaN and negative weights, reporting the first offending edge.
fn check_weights(graph: &Graph) -> Result<()> {
    for (edge, &weight) in graph.weights().iter().enumerate() {
        if weight.is_nan() {
            return Err(GraphError::NonFiniteWeight { edge });
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { edge, weight });
        }
    }
    Ok(())
}

/// Computes distances from `seed` along outgoing edges.
///
/// # Errors
/// Returns [`GraphError::SeedOutOfRange`] for an unknown seed,
/// [`GraphError::NegativeWeight`] or [`GraphError::NonFiniteWeight`] when a
/// weight is negative or NaN.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, dijkstra};
///
/// let graph = Graph::build(
///     4,
///     EdgeTriplets::new(vec![0, 1, 2], vec![1, 2, 3], vec![1.0, 1.0, 1.0]),
/// )?;
/// assert_eq!(dijkstra(&graph, 0, f64::INFINITY)?, vec![0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(dijkstra(&graph, 2, -1.0)?, vec![-1.0, -1.0, 0.0, 1.0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "shortest_path.dijkstra",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seed = seed),
)]
pub fn dijkstra(graph: &Graph, seed: usize, unreached: f64) -> Result<Vec<f64>> {
    check_seed(graph, seed)?;
    check_weights(graph)?;
    Ok(run(graph, &[seed], unreached))
}

/// As [`dijkstra`] without weight validation.
///
/// The caller guarantees that weights are non-negative; otherwise the
/// returned distances are unspecified (but the call still terminates).
///
/// # Errors
/// Returns [`GraphError::SeedOutOfRange`] for an unknown seed.
#[instrument(
    name = "shortest_path.dijkstra_unchecked",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seed = seed),
)]
pub fn dijkstra_unchecked(graph: &Graph, seed: usize, unreached: f64) -> Result<Vec<f64>> {
    check_seed(graph, seed)?;
    Ok(run(graph, &[seed], unreached))
}

/// Computes each vertex's distance to its nearest seed.
///
/// Equivalent to a single Dijkstra from a virtual source joined to every
/// seed by a zero-weight edge. An empty seed list leaves every vertex
/// unreached.
///
/// # Errors
/// As [`dijkstra`], for every seed.
#[instrument(
    name = "shortest_path.multiseed",
    err,
    skip(graph, seeds),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seeds = seeds.len()),
)]
pub fn dijkstra_multiseed(graph: &Graph, seeds: &[usize], unreached: f64) -> Result<Vec<f64>> {
    check_seeds(graph, seeds)?;
    check_weights(graph)?;
    Ok(run(graph, seeds, unreached))
}

/// Computes one distance row per seed, in seed order.
///
/// Weights are validated and the neighbour list built once for all seeds.
///
/// # Errors
/// As [`dijkstra`], for every seed.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, floyd_partial};
///
/// let graph = Graph::build(
///     3,
///     EdgeTriplets::new(vec![0, 1, 1, 2], vec![1, 0, 2, 1], vec![2.0, 2.0, 5.0, 5.0]),
/// )?;
/// let rows = floyd_partial(&graph, &[2, 0], f64::INFINITY)?;
/// assert_eq!(rows.row(0), &[7.0, 5.0, 0.0]);
/// assert_eq!(rows.row(1), &[0.0, 2.0, 7.0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "shortest_path.floyd_partial",
    err,
    skip(graph, seeds),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seeds = seeds.len()),
)]
pub fn floyd_partial(graph: &Graph, seeds: &[usize], unreached: f64) -> Result<Matrix> {
    check_seeds(graph, seeds)?;
    check_weights(graph)?;

    let csr = graph.neighbor_list();
    let mut geodesics = Matrix::filled(seeds.len(), graph.vertex_count(), unreached);
    for (row, &seed) in seeds.iter().enumerate() {
        let settled = settle(&csr, &[seed]);
        for (slot, distance) in geodesics.row_mut(row).iter_mut().zip(&settled.distances) {
            if let Some(distance) = distance {
                *slot = *distance;
            }
        }
    }
    Ok(geodesics)
}

/// Computes the full `V x V` geodesic matrix by repeated Dijkstra.
///
/// # Errors
/// Returns [`GraphError::NegativeWeight`] or [`GraphError::NonFiniteWeight`]
/// when a weight is negative or NaN.
#[instrument(
    name = "shortest_path.floyd",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn floyd(graph: &Graph, unreached: f64) -> Result<Matrix> {
    let seeds: Vec<usize> = (0..graph.vertex_count()).collect();
    floyd_partial(graph, &seeds, unreached)
}

/// Assigns every vertex to its nearest seed.
///
/// Labels are positions in `seeds`; on equal distance the seed listed first
/// wins. Unreachable vertices are labelled `None`. A vertex listed twice as
/// a seed belongs to its first listing.
///
/// # Errors
/// As [`dijkstra`], for every seed.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, voronoi};
///
/// // Path 0 - 1 - 2 - 3 - 4 with seeds at both ends, plus isolated vertex 5.
/// let graph = Graph::build(
///     6,
///     EdgeTriplets::new(
///         vec![0, 1, 1, 2, 2, 3, 3, 4],
///         vec![1, 0, 2, 1, 3, 2, 4, 3],
///         vec![1.0; 8],
///     ),
/// )?;
/// let labels = voronoi(&graph, &[4, 0])?;
/// assert_eq!(labels, vec![Some(1), Some(1), Some(0), Some(0), Some(0), None]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "shortest_path.voronoi",
    err,
    skip(graph, seeds),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seeds = seeds.len()),
)]
pub fn voronoi(graph: &Graph, seeds: &[usize]) -> Result<Vec<Option<usize>>> {
    check_seeds(graph, seeds)?;
    check_weights(graph)?;
    let settled = settle(&graph.neighbor_list(), seeds);
    debug!(reached = settled.reached(), "voronoi cells assigned");
    Ok(settled.owners)
}

fn run(graph: &Graph, seeds: &[usize], unreached: f64) -> Vec<f64> {
    let settled = settle(&graph.neighbor_list(), seeds);
    debug!(reached = settled.reached(), "frontier exhausted");
    settled.distances_or(unreached)
}
