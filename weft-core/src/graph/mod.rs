//! Sparse edge-triplet graph store.
//!
//! A [`Graph`] holds a vertex count and three parallel buffers indexed by
//! edge id: origins, ends and weights. Edges are directed; builders that
//! need symmetry emit both directions explicitly. Every endpoint is kept in
//! `[0, vertex_count)` by construction: ids enter the store through
//! [`Graph::build`], [`Graph::vertex`] or [`Graph::set_edge`], all of which
//! validate them.
//!
//! [`EdgeTriplets`] is the stable exchange format with callers. Exporting a
//! graph and importing the triplets again with the same vertex count yields
//! an identical graph.

mod neighbors;

use std::fmt;

use tracing::instrument;

use crate::error::{GraphError, Result};

pub use self::neighbors::NeighborList;

/// Opaque vertex identifier, valid for the graph it was obtained from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct VertexId(usize);

impl VertexId {
    pub(crate) const fn new_unchecked(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based vertex index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn index(self) -> usize { self.0 }
}

impl From<VertexId> for usize {
    fn from(id: VertexId) -> Self {
        id.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single directed edge read out of a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Origin vertex.
    pub origin: VertexId,
    /// End vertex.
    pub end: VertexId,
    /// Edge weight (a length, an affinity or a raw value).
    pub weight: f64,
}

/// Owned origin/end/weight buffers used to move graphs across the API
/// boundary.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph};
///
/// let triplets = EdgeTriplets::new(vec![0, 1], vec![1, 0], vec![2.5, 2.5]);
/// let graph = Graph::build(2, triplets.clone())?;
/// assert_eq!(graph.to_triplets(), triplets);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeTriplets {
    /// Edge origins.
    pub origins: Vec<usize>,
    /// Edge ends.
    pub ends: Vec<usize>,
    /// Edge weights.
    pub weights: Vec<f64>,
}

impl EdgeTriplets {
    /// Bundles three parallel buffers.
    #[must_use]
    pub fn new(origins: Vec<usize>, ends: Vec<usize>, weights: Vec<f64>) -> Self {
        Self {
            origins,
            ends,
            weights,
        }
    }

    /// Returns the number of edges described by the origin buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns whether the triplets describe no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Sparse directed graph stored as parallel edge buffers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    vertex_count: usize,
    origins: Vec<VertexId>,
    ends: Vec<VertexId>,
    weights: Vec<f64>,
}

impl Graph {
    /// Allocates a graph with `edge_count` zero-weight placeholder edges.
    ///
    /// Placeholder edges are self-loops on vertex 0 until overwritten with
    /// [`Graph::set_edge`].
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidSize`] when edges are requested for a
    /// graph without vertices, or when the buffers cannot be allocated.
    pub fn new(vertex_count: usize, edge_count: usize) -> Result<Self> {
        if edge_count > 0 && vertex_count == 0 {
            return Err(GraphError::InvalidSize {
                vertex_count,
                edge_count,
                reason: "edges require at least one vertex",
            });
        }
        Ok(Self {
            vertex_count,
            origins: allocate(VertexId(0), vertex_count, edge_count)?,
            ends: allocate(VertexId(0), vertex_count, edge_count)?,
            weights: allocate(0.0, vertex_count, edge_count)?,
        })
    }

    /// Validates and takes ownership of edge triplets.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidSize`] when the three buffers differ in
    /// length and [`GraphError::IndexOutOfRange`] when an endpoint is not
    /// below `vertex_count`.
    ///
    /// # Examples
    /// ```
    /// use weft_core::{EdgeTriplets, Graph, GraphError};
    ///
    /// let bad = EdgeTriplets::new(vec![0], vec![3], vec![1.0]);
    /// let err = Graph::build(3, bad).expect_err("vertex 3 does not exist");
    /// assert!(matches!(err, GraphError::IndexOutOfRange { index: 3, vertex_count: 3 }));
    /// ```
    pub fn build(vertex_count: usize, triplets: EdgeTriplets) -> Result<Self> {
        let EdgeTriplets {
            origins,
            ends,
            weights,
        } = triplets;
        let edge_count = origins.len();
        if ends.len() != edge_count || weights.len() != edge_count {
            return Err(GraphError::InvalidSize {
                vertex_count,
                edge_count,
                reason: "origin, end and weight buffers differ in length",
            });
        }
        let origins = checked_ids(origins, vertex_count)?;
        let ends = checked_ids(ends, vertex_count)?;
        Ok(Self {
            vertex_count,
            origins,
            ends,
            weights,
        })
    }

    /// Builds a graph whose vertex count is one past the largest endpoint.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidSize`] when the buffers differ in length.
    pub fn build_inferred(triplets: EdgeTriplets) -> Result<Self> {
        let vertex_count = triplets
            .origins
            .iter()
            .chain(triplets.ends.iter())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        Self::build(vertex_count, triplets)
    }

    pub(crate) fn from_parts(
        vertex_count: usize,
        origins: Vec<VertexId>,
        ends: Vec<VertexId>,
        weights: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(origins.len(), ends.len());
        debug_assert_eq!(origins.len(), weights.len());
        Self {
            vertex_count,
            origins,
            ends,
            weights,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.origins.len() }

    /// Returns the edge origins.
    #[must_use]
    #[rustfmt::skip]
    pub fn origins(&self) -> &[VertexId] { &self.origins }

    /// Returns the edge ends.
    #[must_use]
    #[rustfmt::skip]
    pub fn ends(&self) -> &[VertexId] { &self.ends }

    /// Returns the edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> &[f64] { &self.weights }

    /// Returns the edge weights for in-place editing. Topology is fixed.
    #[rustfmt::skip]
    pub fn weights_mut(&mut self) -> &mut [f64] { &mut self.weights }

    /// Resolves a vertex index against this graph.
    ///
    /// # Errors
    /// Returns [`GraphError::IndexOutOfRange`] when `index >= vertex_count`.
    pub fn vertex(&self, index: usize) -> Result<VertexId> {
        if index < self.vertex_count {
            Ok(VertexId(index))
        } else {
            Err(GraphError::IndexOutOfRange {
                index,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Returns the edge with id `edge`, if present.
    #[must_use]
    pub fn edge(&self, edge: usize) -> Option<Edge> {
        Some(Edge {
            origin: *self.origins.get(edge)?,
            end: *self.ends.get(edge)?,
            weight: *self.weights.get(edge)?,
        })
    }

    /// Iterates over the edges in id order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        self.origins
            .iter()
            .zip(&self.ends)
            .zip(&self.weights)
            .map(|((&origin, &end), &weight)| Edge {
                origin,
                end,
                weight,
            })
    }

    /// Overwrites edge `edge` in place.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeOutOfRange`] for an unknown edge id and
    /// [`GraphError::IndexOutOfRange`] for an unknown endpoint. The graph is
    /// unchanged on error.
    pub fn set_edge(&mut self, edge: usize, origin: usize, end: usize, weight: f64) -> Result<()> {
        if edge >= self.edge_count() {
            return Err(GraphError::EdgeOutOfRange {
                edge,
                edge_count: self.edge_count(),
            });
        }
        let origin = self.vertex(origin)?;
        let end = self.vertex(end)?;
        self.origins[edge] = origin;
        self.ends[edge] = end;
        self.weights[edge] = weight;
        Ok(())
    }

    /// Replaces every edge weight.
    ///
    /// # Errors
    /// Returns [`GraphError::SizeMismatch`] when `weights.len()` differs
    /// from the edge count.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.edge_count() {
            return Err(GraphError::SizeMismatch {
                expected: self.edge_count(),
                actual: weights.len(),
            });
        }
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    /// Copies `source` into `self`, which must hold the same number of edges.
    ///
    /// # Errors
    /// Returns [`GraphError::SizeMismatch`] when the edge counts differ.
    pub fn copy_from(&mut self, source: &Self) -> Result<()> {
        if self.edge_count() != source.edge_count() {
            return Err(GraphError::SizeMismatch {
                expected: self.edge_count(),
                actual: source.edge_count(),
            });
        }
        self.vertex_count = source.vertex_count;
        self.origins.copy_from_slice(&source.origins);
        self.ends.copy_from_slice(&source.ends);
        self.weights.copy_from_slice(&source.weights);
        Ok(())
    }

    /// Discards the current buffers and reallocates zeroed storage.
    ///
    /// # Errors
    /// Propagates [`Graph::new`] failures; `self` is untouched on error.
    pub fn resize(&mut self, vertex_count: usize, edge_count: usize) -> Result<()> {
        *self = Self::new(vertex_count, edge_count)?;
        Ok(())
    }

    /// Exports freshly owned triplet buffers.
    #[must_use]
    pub fn to_triplets(&self) -> EdgeTriplets {
        EdgeTriplets {
            origins: self.origins.iter().map(|id| id.index()).collect(),
            ends: self.ends.iter().map(|id| id.index()).collect(),
            weights: self.weights.clone(),
        }
    }

    /// Consumes the graph and returns its triplets.
    #[must_use]
    pub fn into_triplets(self) -> EdgeTriplets {
        EdgeTriplets {
            origins: self.origins.into_iter().map(usize::from).collect(),
            ends: self.ends.into_iter().map(usize::from).collect(),
            weights: self.weights,
        }
    }

    /// Counts outgoing edges per vertex.
    #[must_use]
    pub fn out_degrees(&self) -> Vec<usize> {
        count_endpoints(self.vertex_count, &self.origins)
    }

    /// Counts incoming edges per vertex.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        count_endpoints(self.vertex_count, &self.ends)
    }

    /// Builds the CSR neighbour-list view of this graph.
    #[must_use]
    pub fn neighbor_list(&self) -> NeighborList {
        NeighborList::from_graph(self)
    }

    /// Extracts the subgraph induced by `keep`.
    ///
    /// Kept vertices are relabelled to `[0, n)` in ascending order of their
    /// original ids; duplicates in `keep` are ignored.
    ///
    /// # Errors
    /// Returns [`GraphError::IndexOutOfRange`] when `keep` names a vertex
    /// that does not exist.
    ///
    /// # Examples
    /// ```
    /// use weft_core::{EdgeTriplets, Graph};
    ///
    /// let graph = Graph::build(
    ///     4,
    ///     EdgeTriplets::new(vec![0, 1, 2], vec![1, 2, 3], vec![1.0, 2.0, 3.0]),
    /// )?;
    /// let sub = graph.subgraph(&[3, 2])?;
    /// assert_eq!(sub.vertex_count(), 2);
    /// assert_eq!(sub.to_triplets(), EdgeTriplets::new(vec![0], vec![1], vec![3.0]));
    /// # Ok::<(), weft_core::GraphError>(())
    /// ```
    pub fn subgraph(&self, keep: &[usize]) -> Result<Self> {
        let mut mask = vec![false; self.vertex_count];
        for &index in keep {
            let vertex = self.vertex(index)?;
            mask[vertex.index()] = true;
        }
        self.extract_subgraph(&mask)
    }

    /// Extracts the subgraph induced by the vertices whose mask entry is set.
    ///
    /// # Errors
    /// Returns [`GraphError::SizeMismatch`] when `mask.len()` differs from
    /// the vertex count.
    #[instrument(
        name = "graph.subgraph",
        err,
        skip(self, mask),
        fields(vertices = self.vertex_count, edges = self.edge_count()),
    )]
    pub fn extract_subgraph(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.vertex_count {
            return Err(GraphError::SizeMismatch {
                expected: self.vertex_count,
                actual: mask.len(),
            });
        }

        let mut relabel = vec![None; self.vertex_count];
        let mut kept = 0;
        for (slot, &keep) in relabel.iter_mut().zip(mask) {
            if keep {
                *slot = Some(VertexId(kept));
                kept += 1;
            }
        }

        let mut origins = Vec::new();
        let mut ends = Vec::new();
        let mut weights = Vec::new();
        for edge in self.edges() {
            if let (Some(origin), Some(end)) =
                (relabel[edge.origin.index()], relabel[edge.end.index()])
            {
                origins.push(origin);
                ends.push(end);
                weights.push(edge.weight);
            }
        }

        Ok(Self::from_parts(kept, origins, ends, weights))
    }
}

fn allocate<T: Clone>(value: T, vertex_count: usize, edge_count: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(edge_count)
        .map_err(|_| GraphError::InvalidSize {
            vertex_count,
            edge_count,
            reason: "edge buffers could not be allocated",
        })?;
    buffer.resize(edge_count, value);
    Ok(buffer)
}

fn checked_ids(ids: Vec<usize>, vertex_count: usize) -> Result<Vec<VertexId>> {
    if let Some(&index) = ids.iter().find(|&&index| index >= vertex_count) {
        return Err(GraphError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(ids.into_iter().map(VertexId).collect())
}

fn count_endpoints(vertex_count: usize, endpoints: &[VertexId]) -> Vec<usize> {
    let mut counts = vec![0; vertex_count];
    for endpoint in endpoints {
        counts[endpoint.index()] += 1;
    }
    counts
}

#[cfg(test)]
mod tests;
