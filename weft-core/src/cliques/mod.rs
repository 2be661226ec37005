//! Clique extraction by replicator dynamics.
//!
//! Edge weights are read as pairwise affinities. A probability vector over
//! the unassigned vertices is relaxed with the discrete replicator update
//! `x_i <- x_i (W x)_i / (x^T W x)` until it stops moving; the vertices that
//! keep a non-negligible share of the mass form the next clique. The process
//! then restarts on the remaining vertices until every vertex is labelled.
//!
//! The starting vector is drawn from a [`SmallRng`] seeded with the
//! configured seed, so the same seed reproduces the same labelling while
//! different seeds may return different, equally valid partitions.

use std::num::NonZeroUsize;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NeighborList};

const DEFAULT_MAX_ITERATIONS: usize = 1_000;
const DEFAULT_TOLERANCE: f64 = 1e-8;
const DEFAULT_SUPPORT_RATIO: f64 = 1e-2;

/// Configures and constructs [`ReplicatorDynamics`] instances.
///
/// # Examples
/// ```
/// use weft_core::ReplicatorBuilder;
///
/// let dynamics = ReplicatorBuilder::new()
///     .with_max_iterations(200)
///     .with_seed(7)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(dynamics.max_iterations().get(), 200);
/// assert_eq!(dynamics.seed(), 7);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicatorBuilder {
    max_iterations: usize,
    tolerance: f64,
    support_ratio: f64,
    seed: u64,
}

impl Default for ReplicatorBuilder {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            support_ratio: DEFAULT_SUPPORT_RATIO,
            seed: 0,
        }
    }
}

impl ReplicatorBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of replicator updates per clique.
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Stops relaxing once the L1 change of one update falls below
    /// `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Admits a vertex to the clique when its mass is at least `ratio`
    /// times the largest mass.
    #[must_use]
    pub fn with_support_ratio(mut self, ratio: f64) -> Self {
        self.support_ratio = ratio;
        self
    }

    /// Seeds the random starting vector.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured iteration cap.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_iterations(&self) -> usize { self.max_iterations }

    /// Returns the configured tolerance.
    #[must_use]
    #[rustfmt::skip]
    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Returns the configured support ratio.
    #[must_use]
    #[rustfmt::skip]
    pub fn support_ratio(&self) -> f64 { self.support_ratio }

    /// Returns the configured seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] when the iteration cap is
    /// zero, the tolerance is negative or not finite, or the support ratio
    /// lies outside `(0, 1]`.
    pub fn build(self) -> Result<ReplicatorDynamics> {
        let max_iterations = NonZeroUsize::new(self.max_iterations)
            .ok_or_else(|| GraphError::invalid_parameter("max_iterations", "must be positive"))?;
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(GraphError::invalid_parameter(
                "tolerance",
                format!("must be finite and non-negative, got {}", self.tolerance),
            ));
        }
        if !(self.support_ratio > 0.0 && self.support_ratio <= 1.0) {
            return Err(GraphError::invalid_parameter(
                "support_ratio",
                format!("must lie in (0, 1], got {}", self.support_ratio),
            ));
        }
        Ok(ReplicatorDynamics {
            max_iterations,
            tolerance: self.tolerance,
            support_ratio: self.support_ratio,
            seed: self.seed,
        })
    }
}

/// Validated replicator-dynamics configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicatorDynamics {
    max_iterations: NonZeroUsize,
    tolerance: f64,
    support_ratio: f64,
    seed: u64,
}

/// Dense clique labels, one per vertex.
///
/// Label `0` is the first clique extracted; labels increase in extraction
/// order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CliqueLabels {
    labels: Vec<usize>,
    clique_count: usize,
}

impl CliqueLabels {
    /// Returns the clique label of every vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[usize] { &self.labels }

    /// Consumes the labelling and returns the label buffer.
    #[must_use]
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Returns the number of cliques.
    #[must_use]
    #[rustfmt::skip]
    pub fn clique_count(&self) -> usize { self.clique_count }

    /// Returns the vertices carrying `label`, in ascending order.
    #[must_use]
    pub fn members(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(vertex, &l)| (l == label).then_some(vertex))
            .collect()
    }
}

impl ReplicatorDynamics {
    /// Returns the iteration cap.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_iterations(&self) -> NonZeroUsize { self.max_iterations }

    /// Returns the convergence tolerance.
    #[must_use]
    #[rustfmt::skip]
    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Returns the support ratio.
    #[must_use]
    #[rustfmt::skip]
    pub fn support_ratio(&self) -> f64 { self.support_ratio }

    /// Returns the seed of the starting vector.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Partitions the vertices of `graph` into cliques.
    ///
    /// Vertices with no affinity to any other unassigned vertex end up as
    /// singleton cliques, in ascending vertex order.
    ///
    /// # Errors
    /// Returns [`GraphError::NegativeWeight`] for negative affinities and
    /// [`GraphError::NonFiniteWeight`] for NaN or infinite ones.
    ///
    /// # Examples
    /// ```
    /// use weft_core::{EdgeTriplets, Graph, ReplicatorBuilder};
    ///
    /// // A unit-weight triangle and an isolated vertex.
    /// let graph = Graph::build(
    ///     4,
    ///     EdgeTriplets::new(
    ///         vec![0, 1, 1, 2, 0, 2],
    ///         vec![1, 0, 2, 1, 2, 0],
    ///         vec![1.0; 6],
    ///     ),
    /// )?;
    /// let cliques = ReplicatorBuilder::new().build()?.extract(&graph)?;
    /// assert_eq!(cliques.labels(), &[0, 0, 0, 1]);
    /// # Ok::<(), weft_core::GraphError>(())
    /// ```
    #[instrument(
        name = "cliques.extract",
        err,
        skip(self, graph),
        fields(vertices = graph.vertex_count(), edges = graph.edge_count(), seed = self.seed),
    )]
    pub fn extract(&self, graph: &Graph) -> Result<CliqueLabels> {
        check_affinities(graph)?;

        let csr = graph.neighbor_list();
        let scale = affinity_scale(graph);
        let vertex_count = graph.vertex_count();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut labels: Vec<Option<usize>> = vec![None; vertex_count];
        let mut remaining = vertex_count;
        let mut clique_count = 0;

        while remaining > 0 {
            let mut state = Relaxation::start(&csr, scale, &labels, &mut rng);
            if state.mean <= 0.0 {
                debug!(remaining, "residual vertices share no affinity; emitting singletons");
                for label in labels.iter_mut().filter(|label| label.is_none()) {
                    *label = Some(clique_count);
                    clique_count += 1;
                }
                break;
            }

            let iterations = state.relax(&csr, self.max_iterations.get(), self.tolerance);
            let threshold = self.support_ratio * state.peak();
            let mut size = 0;
            for (label, &mass) in labels.iter_mut().zip(&state.mass) {
                if label.is_none() && mass > 0.0 && mass >= threshold {
                    *label = Some(clique_count);
                    size += 1;
                }
            }
            if size == 0 {
                // Degenerate relaxation: peel off the lowest unassigned vertex.
                debug!(clique = clique_count, "relaxation admitted no vertex; emitting singleton");
                if let Some(label) = labels.iter_mut().find(|label| label.is_none()) {
                    *label = Some(clique_count);
                    size = 1;
                }
            }
            debug!(clique = clique_count, size, iterations, "clique extracted");
            remaining -= size;
            clique_count += 1;
        }

        Ok(CliqueLabels {
            labels: labels.into_iter().map(|label| label.unwrap_or(0)).collect(),
            clique_count,
        })
    }
}

/// Extracts cliques with the default configuration and an explicit seed.
///
/// # Errors
/// As [`ReplicatorDynamics::extract`].
pub fn clique_labels(graph: &Graph, seed: u64) -> Result<CliqueLabels> {
    ReplicatorBuilder::new()
        .with_seed(seed)
        .build()?
        .extract(graph)
}

/// Largest affinity, used to keep `W x` and `x^T W x` finite. Replicator
/// updates are invariant under scaling `W` by a positive constant.
fn affinity_scale(graph: &Graph) -> f64 {
    let max = graph.weights().iter().copied().fold(0.0, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

fn check_affinities(graph: &Graph) -> Result<()> {
    for (edge, &weight) in graph.weights().iter().enumerate() {
        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight { edge });
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { edge, weight });
        }
    }
    Ok(())
}

/// Replicator state restricted to the unassigned vertices.
struct Relaxation {
    scale: f64,
    active: Vec<bool>,
    mass: Vec<f64>,
    fitness: Vec<f64>,
    mean: f64,
}

impl Relaxation {
    fn start(
        csr: &NeighborList,
        scale: f64,
        labels: &[Option<usize>],
        rng: &mut SmallRng,
    ) -> Self {
        let active: Vec<bool> = labels.iter().map(Option::is_none).collect();
        let mut mass: Vec<f64> = active
            .iter()
            .map(|&is_active| if is_active { rng.gen_range(0.5..1.5) } else { 0.0 })
            .collect();
        let total: f64 = mass.iter().sum();
        for value in &mut mass {
            *value /= total;
        }
        let mut state = Self {
            scale,
            active,
            fitness: vec![0.0; mass.len()],
            mass,
            mean: 0.0,
        };
        state.evaluate(csr);
        state
    }

    /// Recomputes `fitness = W x` over active vertices and `mean = x^T W x`,
    /// with `W` divided by `scale`.
    fn evaluate(&mut self, csr: &NeighborList) {
        self.mean = 0.0;
        for vertex in 0..self.mass.len() {
            if !self.active[vertex] {
                continue;
            }
            let fitness: f64 = csr
                .outgoing(vertex)
                .filter(|&(end, _)| self.active[end])
                .map(|(end, weight)| weight / self.scale * self.mass[end])
                .sum();
            self.fitness[vertex] = fitness;
            self.mean += self.mass[vertex] * fitness;
        }
    }

    /// Applies replicator updates until convergence; returns the number of
    /// updates performed.
    fn relax(&mut self, csr: &NeighborList, max_iterations: usize, tolerance: f64) -> usize {
        for iteration in 1..=max_iterations {
            let mut change = 0.0;
            for vertex in (0..self.mass.len()).filter(|&v| self.active[v]) {
                let next = self.mass[vertex] * self.fitness[vertex] / self.mean;
                change += (next - self.mass[vertex]).abs();
                self.mass[vertex] = next;
            }
            self.evaluate(csr);
            if change < tolerance || self.mean <= 0.0 {
                return iteration;
            }
        }
        max_iterations
    }

    fn peak(&self) -> f64 {
        self.mass.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests;
