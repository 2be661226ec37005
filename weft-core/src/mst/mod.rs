//! Boruvka minimum spanning trees over point clouds and existing graphs.
//!
//! Each round finds, for every component, its cheapest outgoing candidate
//! under a strict total order, then merges along those edges. The order is
//! `(weight, rank)` where the rank is the canonical pair `(min, max)` for
//! point clouds and the edge id for graphs, so equal weights never create
//! cycles and the result is deterministic. Point-cloud distances are
//! evaluated on demand each round; the complete graph is never stored.

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::matrix::Matrix;
use crate::metric::pair_distance;
use crate::telemetry;
use crate::union_find::DisjointSet;

/// Minimum spanning forest stored as a symmetric graph.
///
/// Every tree edge appears twice, once per direction, so the stored graph
/// holds `2 * (V - component_count)` edges.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningForest {
    graph: Graph,
    total_weight: f64,
    component_count: usize,
}

impl SpanningForest {
    /// Returns the symmetric forest graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Consumes the forest and returns its graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Sum of tree edge weights, each edge counted once.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Whether the forest is a single spanning tree. An empty input has no
    /// tree.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Undirected candidate edge in canonical form (`low < high`).
#[derive(Clone, Copy, Debug)]
struct Candidate {
    low: usize,
    high: usize,
    weight: f64,
    rank: (usize, usize),
}

impl Candidate {
    fn order(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

/// Supplies candidate edges to a Boruvka round.
trait CandidateSource {
    fn vertex_count(&self) -> usize;

    /// Visits every candidate whose endpoints lie in different components,
    /// given each vertex's current root.
    fn for_each_crossing(&self, roots: &[usize], visit: impl FnMut(Candidate));
}

struct PointCloud<'a>(&'a Matrix);

impl CandidateSource for PointCloud<'_> {
    fn vertex_count(&self) -> usize {
        self.0.rows()
    }

    fn for_each_crossing(&self, roots: &[usize], mut visit: impl FnMut(Candidate)) {
        let n = self.0.rows();
        for low in 0..n {
            for high in (low + 1)..n {
                if roots[low] != roots[high] {
                    visit(Candidate {
                        low,
                        high,
                        weight: pair_distance(self.0, low, high),
                        rank: (low, high),
                    });
                }
            }
        }
    }
}

struct EdgeList {
    vertex_count: usize,
    candidates: Vec<Candidate>,
}

impl CandidateSource for EdgeList {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn for_each_crossing(&self, roots: &[usize], mut visit: impl FnMut(Candidate)) {
        self.candidates
            .iter()
            .filter(|c| roots[c.low] != roots[c.high])
            .for_each(|&c| visit(c));
    }
}

/// Computes the Euclidean minimum spanning tree of a point cloud.
///
/// # Errors
/// Returns [`GraphError::NonFiniteCoordinate`] for NaN or infinite
/// coordinates.
///
/// # Examples
/// ```
/// use weft_core::{Matrix, minimum_spanning_tree};
///
/// let points = Matrix::from_rows(&[[0.0], [1.0], [3.0], [6.0]])?;
/// let forest = minimum_spanning_tree(&points)?;
/// assert_eq!(forest.total_weight(), 6.0);
/// assert_eq!(forest.graph().edge_count(), 6);
/// assert!(forest.is_tree());
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "mst.points",
    err,
    skip(points),
    fields(points = points.rows(), dims = points.cols()),
)]
pub fn minimum_spanning_tree(points: &Matrix) -> Result<SpanningForest> {
    points.ensure_finite()?;
    Ok(boruvka(&PointCloud(points)))
}

/// Computes the minimum spanning forest of a graph's undirected view.
///
/// Edge direction is ignored, self-loops are skipped, and among parallel
/// edges of equal weight the lowest edge id wins.
///
/// # Errors
/// Returns [`GraphError::NonFiniteWeight`] when a weight is NaN.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, skeleton};
///
/// // A weighted triangle plus an isolated vertex.
/// let graph = Graph::build(
///     4,
///     EdgeTriplets::new(vec![0, 1, 2], vec![1, 2, 0], vec![1.0, 2.0, 5.0]),
/// )?;
/// let forest = skeleton(&graph)?;
/// assert_eq!(forest.total_weight(), 3.0);
/// assert_eq!(forest.component_count(), 2);
/// assert!(!forest.is_tree());
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "mst.skeleton",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn skeleton(graph: &Graph) -> Result<SpanningForest> {
    let mut candidates = Vec::with_capacity(graph.edge_count());
    for (id, edge) in graph.edges().enumerate() {
        if edge.weight.is_nan() {
            return Err(GraphError::NonFiniteWeight { edge: id });
        }
        let (origin, end) = (edge.origin.index(), edge.end.index());
        if origin != end {
            candidates.push(Candidate {
                low: origin.min(end),
                high: origin.max(end),
                weight: edge.weight,
                rank: (id, 0),
            });
        }
    }
    Ok(boruvka(&EdgeList {
        vertex_count: graph.vertex_count(),
        candidates,
    }))
}

fn boruvka(source: &impl CandidateSource) -> SpanningForest {
    let vertex_count = source.vertex_count();
    let mut sets = DisjointSet::new(vertex_count);
    let mut tree: Vec<Candidate> = Vec::with_capacity(vertex_count.saturating_sub(1));
    let mut round = 0_usize;

    while sets.components() > 1 {
        let roots: Vec<usize> = (0..vertex_count).map(|v| sets.find(v)).collect();
        let mut cheapest: Vec<Option<Candidate>> = vec![None; vertex_count];
        source.for_each_crossing(&roots, |candidate| {
            for root in [roots[candidate.low], roots[candidate.high]] {
                let slot = &mut cheapest[root];
                if slot.is_none_or(|best| candidate.order(&best).is_lt()) {
                    *slot = Some(candidate);
                }
            }
        });

        let before = tree.len();
        for candidate in cheapest.into_iter().flatten() {
            if sets.union(candidate.low, candidate.high) {
                tree.push(candidate);
            }
        }
        round += 1;
        telemetry::record_mst_round();
        debug!(round, components = sets.components(), "boruvka round");
        if tree.len() == before {
            break;
        }
    }

    tree.sort_unstable_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then_with(|| a.low.cmp(&b.low))
            .then_with(|| a.high.cmp(&b.high))
    });

    let mut origins = Vec::with_capacity(tree.len() * 2);
    let mut ends = Vec::with_capacity(tree.len() * 2);
    let mut weights = Vec::with_capacity(tree.len() * 2);
    let mut total_weight = 0.0;
    for edge in &tree {
        let (low, high) = (VertexId::new_unchecked(edge.low), VertexId::new_unchecked(edge.high));
        origins.extend([low, high]);
        ends.extend([high, low]);
        weights.extend([edge.weight, edge.weight]);
        total_weight += edge.weight;
    }

    SpanningForest {
        graph: Graph::from_parts(vertex_count, origins, ends, weights),
        total_weight,
        component_count: sets.components(),
    }
}
