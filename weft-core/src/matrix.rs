//! Row-major dense matrix of `f64` values.
//!
//! The engine treats a [`Matrix`] as an opaque block of doubles with a row
//! and column count: point clouds arrive as one point per row, and the
//! Floyd-family geodesics return one row per seed.

use crate::error::{GraphError, Result};

/// Dense row-major matrix.
///
/// # Examples
/// ```
/// use weft_core::Matrix;
///
/// let points = Matrix::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
/// assert_eq!(points.rows(), 2);
/// assert_eq!(points.row(1), &[3.0, 4.0, 5.0]);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Wraps a row-major buffer.
    ///
    /// # Errors
    /// Returns [`GraphError::DimensionMismatch`] when `data.len()` is not
    /// `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(GraphError::DimensionMismatch {
            left: rows,
            right: cols,
        })?;
        if data.len() != expected {
            return Err(GraphError::DimensionMismatch {
                left: expected,
                right: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    /// Returns [`GraphError::DimensionMismatch`] when the rows differ in
    /// length.
    ///
    /// # Examples
    /// ```
    /// use weft_core::Matrix;
    ///
    /// let points = Matrix::from_rows(&[[0.0, 0.0], [3.0, 4.0]])?;
    /// assert_eq!(points.cols(), 2);
    /// # Ok::<(), weft_core::GraphError>(())
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len().saturating_mul(cols));
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GraphError::DimensionMismatch {
                    left: cols,
                    right: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates a matrix filled with `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows.saturating_mul(cols)],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn rows(&self) -> usize { self.rows }

    /// Returns the number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn cols(&self) -> usize { self.cols }

    /// Returns one row as a slice.
    ///
    /// # Panics
    /// Panics when `row >= self.rows()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Returns the element at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Returns the backing row-major buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Rejects NaN or infinite entries, reporting the first offender.
    pub(crate) fn ensure_finite(&self) -> Result<()> {
        match self.data.iter().position(|value| !value.is_finite()) {
            None => Ok(()),
            Some(position) => Err(GraphError::NonFiniteCoordinate {
                row: position / self.cols,
                column: position % self.cols,
            }),
        }
    }
}
