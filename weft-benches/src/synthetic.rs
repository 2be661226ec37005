//! Seeded synthetic inputs.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use weft_core::Matrix;

use crate::error::BenchSetupError;

/// Configuration for a uniform point cloud in the unit hypercube.
#[derive(Clone, Debug)]
pub struct UniformCloud {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
    /// Seed of the coordinate generator.
    pub seed: u64,
}

impl UniformCloud {
    /// Draws the cloud as a row-major [`Matrix`].
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when either extent is zero.
    pub fn generate(&self) -> Result<Matrix, BenchSetupError> {
        if self.point_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "point_count",
            });
        }
        if self.dimensions == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "dimensions",
            });
        }
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let len = self.point_count.saturating_mul(self.dimensions);
        let data: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..1.0)).collect();
        Ok(Matrix::new(self.point_count, self.dimensions, data)?)
    }
}

/// Returns every coordinate of a `side`-wide cube, in lexicographic order.
///
/// # Errors
/// Returns [`BenchSetupError::LatticeTooLarge`] when `side` does not fit in
/// an `i64`.
pub fn lattice(side: usize) -> Result<Vec<[i64; 3]>, BenchSetupError> {
    let extent = i64::try_from(side).map_err(|_| BenchSetupError::LatticeTooLarge { side })?;
    let mut coords = Vec::with_capacity(side.saturating_pow(3));
    for x in 0..extent {
        for y in 0..extent {
            for z in 0..extent {
                coords.push([x, y, z]);
            }
        }
    }
    Ok(coords)
}
