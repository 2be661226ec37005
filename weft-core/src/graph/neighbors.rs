//! Compressed sparse row view over a [`Graph`].

use super::{Graph, VertexId};

/// Outgoing edges grouped by origin.
///
/// `offsets` has one entry per vertex plus a trailing sentinel equal to the
/// edge count; the edges leaving vertex `v` occupy
/// `offsets[v]..offsets[v + 1]` and keep their relative order from the
/// source graph. The view owns its buffers.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph};
///
/// let graph = Graph::build(
///     3,
///     EdgeTriplets::new(vec![2, 0, 2], vec![0, 1, 1], vec![1.0, 2.0, 3.0]),
/// )?;
/// let csr = graph.neighbor_list();
/// assert_eq!(csr.offsets(), &[0, 1, 1, 3]);
/// let v = graph.vertex(2)?;
/// assert_eq!(csr.weights(v), &[1.0, 3.0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborList {
    offsets: Vec<usize>,
    neighbors: Vec<VertexId>,
    weights: Vec<f64>,
}

impl NeighborList {
    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let vertex_count = graph.vertex_count();
        let mut offsets = vec![0_usize; vertex_count + 1];
        for origin in graph.origins() {
            offsets[origin.index() + 1] += 1;
        }
        for v in 0..vertex_count {
            offsets[v + 1] += offsets[v];
        }

        // Stable counting sort: each origin's cursor walks its slot range.
        let mut cursor = offsets[..vertex_count].to_vec();
        let mut neighbors = vec![VertexId::new_unchecked(0); graph.edge_count()];
        let mut weights = vec![0.0; graph.edge_count()];
        for edge in graph.edges() {
            let slot = &mut cursor[edge.origin.index()];
            neighbors[*slot] = edge.end;
            weights[*slot] = edge.weight;
            *slot += 1;
        }

        Self {
            offsets,
            neighbors,
            weights,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.neighbors.len() }

    /// Returns the offsets array (length `vertex_count + 1`).
    #[must_use]
    #[rustfmt::skip]
    pub fn offsets(&self) -> &[usize] { &self.offsets }

    /// Returns the end vertices of the edges leaving `vertex`.
    ///
    /// Vertices outside this view have no neighbours.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        match self.range(vertex.index()) {
            Some(range) => &self.neighbors[range],
            None => &[],
        }
    }

    /// Returns the weights of the edges leaving `vertex`.
    #[must_use]
    pub fn weights(&self, vertex: VertexId) -> &[f64] {
        match self.range(vertex.index()) {
            Some(range) => &self.weights[range],
            None => &[],
        }
    }

    /// Iterates over `(end, weight)` pairs leaving `vertex`.
    pub fn iter(&self, vertex: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.neighbors(vertex)
            .iter()
            .copied()
            .zip(self.weights(vertex).iter().copied())
    }

    pub(crate) fn outgoing(&self, vertex: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.iter(VertexId::new_unchecked(vertex))
            .map(|(end, weight)| (end.index(), weight))
    }

    fn range(&self, vertex: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.offsets.get(vertex)?;
        let end = *self.offsets.get(vertex + 1)?;
        Some(start..end)
    }
}
