//! Dense weight matrix.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dense n×n weight matrix stored in row-major order.
///
/// Directed problems use a `2N×2N` matrix indexed by the arrival and
/// departure ids of [`DirectedId`](crate::directed::DirectedId).
///
/// # Examples
///
/// ```
/// use u_tour::problem::WeightMatrix;
///
/// let m = WeightMatrix::from_rows(vec![
///     vec![0.0, 2.0],
///     vec![3.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.get(0, 1), 2.0);
/// assert_eq!(m.get(1, 0), 3.0);
/// assert!(!m.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightMatrix {
    data: Vec<f64>,
    size: usize,
}

impl WeightMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatrix`] if `data.len() != size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::InvalidMatrix {
                expected: size,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatrix`] if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(Error::InvalidMatrix {
                    expected: size,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { data, size })
    }

    /// Creates a matrix by evaluating `f(from, to)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(size: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for from in 0..size {
            for to in 0..size {
                data.push(f(from, to));
            }
        }
        Self { data, size }
    }

    /// Returns the weight from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the weight from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, weight: f64) {
        self.data[from * self.size + to] = weight;
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
