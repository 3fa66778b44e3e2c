//! Plain TSP problem.

use crate::error::{Error, Result};
use crate::problem::{validate_terminals, TourProblem, WeightMatrix};

/// A travelling-salesman problem over a square weight matrix.
///
/// The topology of the solution follows `last`: `None` gives an open tour,
/// `Some(first)` a closed tour, any other visit a tour with a fixed end.
///
/// # Examples
///
/// ```
/// use u_tour::problem::{TourProblem, WeightMatrix};
/// use u_tour::tsp::TspProblem;
///
/// let weights = WeightMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs());
/// let problem = TspProblem::closed(0, weights).unwrap();
/// assert_eq!(problem.last(), Some(0));
/// assert_eq!(problem.count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TspProblem {
    first: usize,
    last: Option<usize>,
    weights: WeightMatrix,
}

impl TspProblem {
    /// Creates a TSP problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or a terminal is out of
    /// range.
    pub fn new(first: usize, last: Option<usize>, weights: WeightMatrix) -> Result<Self> {
        if weights.size() == 0 {
            return Err(Error::InvalidMatrix {
                expected: 1,
                actual: 0,
            });
        }
        validate_terminals(first, last, weights.size())?;
        Ok(Self {
            first,
            last,
            weights,
        })
    }

    /// Creates a closed TSP starting and ending at `first`.
    pub fn closed(first: usize, weights: WeightMatrix) -> Result<Self> {
        Self::new(first, Some(first), weights)
    }

    /// Creates an open TSP starting at `first`.
    pub fn open(first: usize, weights: WeightMatrix) -> Result<Self> {
        Self::new(first, None, weights)
    }

    /// The weight matrix.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }
}

impl TourProblem for TspProblem {
    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> Option<usize> {
        self.last
    }

    fn count(&self) -> usize {
        self.weights.size()
    }

    #[inline]
    fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_terminals() {
        let w = WeightMatrix::new(3);
        assert_eq!(
            TspProblem::new(3, None, w.clone()).unwrap_err(),
            Error::VisitOutOfRange { visit: 3, count: 3 }
        );
        assert!(TspProblem::new(0, Some(5), w.clone()).is_err());
        assert!(TspProblem::new(0, Some(2), w).is_ok());
        assert!(TspProblem::open(0, WeightMatrix::new(0)).is_err());
    }

    #[test]
    fn test_empty_tour_follows_topology() {
        let w = WeightMatrix::new(3);
        let fixed = TspProblem::new(0, Some(2), w.clone()).unwrap();
        assert_eq!(fixed.empty_tour().to_vec(), vec![0, 2]);
        let closed = TspProblem::closed(1, w).unwrap();
        assert!(closed.empty_tour().is_closed());
        assert_eq!(closed.empty_tour().first(), 1);
    }
}
