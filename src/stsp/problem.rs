//! Selective TSP.

use crate::error::{Error, Result};
use crate::problem::{validate_terminals, TourProblem, WeightMatrix};

/// A TSP where not every visit has to be placed: the tour must stay within
/// `max_weight` and should visit as many visits as possible.
#[derive(Debug, Clone)]
pub struct StspProblem {
    first: usize,
    last: Option<usize>,
    weights: WeightMatrix,
    max_weight: f64,
}

impl StspProblem {
    /// Creates a selective TSP.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty, a terminal is out of range
    /// or `max_weight` is negative or NaN.
    pub fn new(
        first: usize,
        last: Option<usize>,
        weights: WeightMatrix,
        max_weight: f64,
    ) -> Result<Self> {
        if weights.size() == 0 {
            return Err(Error::InvalidMatrix {
                expected: 1,
                actual: 0,
            });
        }
        validate_terminals(first, last, weights.size())?;
        if max_weight.is_nan() || max_weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_weight must be non-negative, got {max_weight}"
            )));
        }
        Ok(Self {
            first,
            last,
            weights,
            max_weight,
        })
    }

    /// Creates a closed selective TSP.
    pub fn closed(first: usize, weights: WeightMatrix, max_weight: f64) -> Result<Self> {
        Self::new(first, Some(first), weights, max_weight)
    }

    /// The weight matrix.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// The weight budget.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }
}

impl TourProblem for StspProblem {
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

    fn weight_budget(&self) -> Option<f64> {
        Some(self.max_weight)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Line of `n` points, closed at 0.
    pub(crate) fn budget_line(n: usize, max_weight: f64) -> StspProblem {
        let weights = WeightMatrix::from_fn(n, |i, j| (i as f64 - j as f64).abs());
        StspProblem::closed(0, weights, max_weight).unwrap()
    }

    #[test]
    fn test_exposes_budget() {
        let p = budget_line(4, 5.0);
        assert_eq!(p.weight_budget(), Some(5.0));
        assert_eq!(p.max_weight(), 5.0);
    }

    #[test]
    fn test_rejects_bad_budget() {
        let w = WeightMatrix::new(3);
        assert!(matches!(
            StspProblem::closed(0, w.clone(), -1.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(StspProblem::closed(0, w.clone(), f64::NAN).is_err());
        assert!(StspProblem::new(0, Some(3), w, 1.0).is_err());
    }
}
