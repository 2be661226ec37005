//! Connected-component labelling over the undirected closure of a graph.

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::union_find::DisjointSet;

/// Dense component labels, one per vertex.
///
/// Labels run from `0` to `component_count() - 1` and are assigned in order
/// of first appearance when scanning vertices by id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentLabels {
    labels: Vec<usize>,
    component_count: usize,
}

impl ComponentLabels {
    /// Returns the label of every vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[usize] { &self.labels }

    /// Consumes the labelling and returns the label buffer.
    #[must_use]
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Returns the number of distinct components.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the number of vertices in each component, indexed by label.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.component_count];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Returns the vertices of the largest component in ascending order.
    ///
    /// The lowest label wins among equally large components. Pass the result
    /// to [`Graph::subgraph`] to extract the main component.
    ///
    /// # Examples
    /// ```
    /// use weft_core::{EdgeTriplets, Graph, connected_components};
    ///
    /// let graph = Graph::build(
    ///     5,
    ///     EdgeTriplets::new(vec![0, 2, 3], vec![1, 3, 4], vec![1.0; 3]),
    /// )?;
    /// let labels = connected_components(&graph);
    /// assert_eq!(labels.largest(), vec![2, 3, 4]);
    /// let main = graph.subgraph(&labels.largest())?;
    /// assert_eq!(main.vertex_count(), 3);
    /// # Ok::<(), weft_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn largest(&self) -> Vec<usize> {
        let sizes = self.sizes();
        let Some(largest) = sizes
            .iter()
            .enumerate()
            .max_by(|(la, a), (lb, b)| a.cmp(b).then_with(|| lb.cmp(la)))
            .map(|(label, _)| label)
        else {
            return Vec::new();
        };
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(vertex, &label)| (label == largest).then_some(vertex))
            .collect()
    }
}

/// Labels the connected components of `graph`, ignoring edge direction.
///
/// Isolated vertices form singleton components.
///
/// # Examples
/// ```
/// use weft_core::{EdgeTriplets, Graph, connected_components};
///
/// let graph = Graph::build(4, EdgeTriplets::new(vec![3], vec![1], vec![1.0]))?;
/// let labels = connected_components(&graph);
/// assert_eq!(labels.labels(), &[0, 1, 2, 1]);
/// assert_eq!(labels.component_count(), 3);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "components.label",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn connected_components(graph: &Graph) -> ComponentLabels {
    let mut sets = DisjointSet::new(graph.vertex_count());
    for edge in graph.edges() {
        sets.union(edge.origin.index(), edge.end.index());
    }

    let mut root_label = vec![None; graph.vertex_count()];
    let mut labels = Vec::with_capacity(graph.vertex_count());
    let mut next = 0;
    for vertex in 0..graph.vertex_count() {
        let root = sets.find(vertex);
        let label = *root_label[root].get_or_insert_with(|| {
            next += 1;
            next - 1
        });
        labels.push(label);
    }
    debug_assert_eq!(next, sets.components());
    debug!(components = next, "components labelled");

    ComponentLabels {
        labels,
        component_count: next,
    }
}
