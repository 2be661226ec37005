//! Euclidean distance helpers shared by the point-cloud builders.

use std::cmp::Ordering;

use crate::error::{GraphError, Result};
use crate::matrix::Matrix;

/// Squared Euclidean distance between two equally sized rows.
pub(crate) fn squared_euclidean(left: &[f64], right: &[f64]) -> f64 {
    debug_assert_eq!(left.len(), right.len());
    let mut sum = 0.0_f64;
    for (&l, &r) in left.iter().zip(right) {
        let diff = l - r;
        sum += diff * diff;
    }
    sum
}

/// Euclidean distance between two equally sized rows.
pub(crate) fn euclidean(left: &[f64], right: &[f64]) -> f64 {
    squared_euclidean(left, right).sqrt()
}

/// Distance between rows `i` and `j` of one cloud, evaluated in canonical
/// order so `(i, j)` and `(j, i)` produce bit-identical weights.
pub(crate) fn pair_distance(points: &Matrix, i: usize, j: usize) -> f64 {
    euclidean(points.row(i.min(j)), points.row(i.max(j)))
}

/// Validates a pair of clouds for cross-set construction.
pub(crate) fn validate_cross(queries: &Matrix, targets: &Matrix) -> Result<()> {
    let both_populated = queries.rows() > 0 && targets.rows() > 0;
    if both_populated && queries.cols() != targets.cols() {
        return Err(GraphError::DimensionMismatch {
            left: queries.cols(),
            right: targets.cols(),
        });
    }
    queries.ensure_finite()?;
    targets.ensure_finite()
}

/// A candidate neighbour ordered by `(distance, index)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
    pub(crate) squared: f64,
    pub(crate) index: usize,
}

impl Candidate {
    pub(crate) fn cmp_key(&self, other: &Self) -> Ordering {
        self.squared
            .total_cmp(&other.squared)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Collects the `k` rows of `targets` nearest to `query` into `out`, sorted
/// by ascending `(distance, index)`. `skip` excludes one target row.
pub(crate) fn k_nearest(
    query: &[f64],
    targets: &Matrix,
    skip: Option<usize>,
    k: usize,
    out: &mut Vec<Candidate>,
) {
    out.clear();
    out.extend(
        targets
            .iter_rows()
            .enumerate()
            .filter(|&(index, _)| Some(index) != skip)
            .map(|(index, row)| Candidate {
                squared: squared_euclidean(query, row),
                index,
            }),
    );
    if k == 0 {
        out.clear();
        return;
    }
    if k < out.len() {
        out.select_nth_unstable_by(k - 1, Candidate::cmp_key);
        out.truncate(k);
    }
    out.sort_unstable_by(Candidate::cmp_key);
}
