//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

/// Parameters for a neighbourhood-graph benchmark run.
#[derive(Clone, Debug)]
pub struct BuilderBenchParams {
    /// Number of points in the cloud.
    pub point_count: usize,
    /// Neighbours per point.
    pub k: usize,
}

impl fmt::Display for BuilderBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.k)
    }
}

/// Parameters for a shortest-path benchmark run.
#[derive(Clone, Debug)]
pub struct PathBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Number of seeds the traversal starts from.
    pub seed_count: usize,
}

impl fmt::Display for PathBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},seeds={}", self.vertex_count, self.seed_count)
    }
}

/// Parameters for a spanning-tree benchmark run.
#[derive(Clone, Debug)]
pub struct MstBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
}

impl fmt::Display for MstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}
