//! Directed problem accessors.

use super::id::{DirectedId, Turn};
use crate::error::{Error, Result};
use crate::problem::{validate_terminals, WeightMatrix};
use crate::tour::Tour;
use crate::tsp::TspProblem;

/// A tour problem whose travel weights depend on the sides visits are
/// entered and left on.
///
/// Terminals and [`count`](Self::count) use plain visit ids; weights are
/// looked up by side index (`id * 2 + side`) as produced by
/// [`DirectedId::arrival_id`] and [`DirectedId::departure_id`].
pub trait DirectedProblem: Send + Sync {
    /// The visit every tour starts at.
    fn first(&self) -> usize;

    /// The designated last visit (`Some(first)` for closed tours).
    fn last(&self) -> Option<usize>;

    /// Number of visits.
    fn count(&self) -> usize;

    /// Weight from the departure side `departure` to the arrival side
    /// `arrival`.
    fn side_weight(&self, departure: usize, arrival: usize) -> f64;

    /// Penalty for passing through a visit with `turn`.
    fn turn_penalty(&self, turn: Turn) -> f64;

    /// The smallest directed tour honouring the terminals.
    fn empty_tour(&self) -> Tour {
        let first = DirectedId::new(self.first(), Turn::ForwardForward).raw();
        let last = self
            .last()
            .map(|l| DirectedId::new(l, Turn::ForwardForward).raw());
        Tour::from_terminals(first, last)
    }
}

/// Directed TSP over a `2N x 2N` side matrix with a turn-penalty table.
///
/// Also carries the undirected projection used to seed directed searches:
/// an `N x N` matrix holding, per pair of visits, the cheapest of the four
/// side combinations.
///
/// # Examples
///
/// ```
/// use u_tour::directed::{DirectedProblem, DirectedTspProblem, Turn};
/// use u_tour::problem::{TourProblem, WeightMatrix};
///
/// let weights = WeightMatrix::from_fn(6, |i, j| if i / 2 == j / 2 { 0.0 } else { 1.0 + (i % 2) as f64 });
/// let problem = DirectedTspProblem::closed(0, weights, [0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(DirectedProblem::count(&problem), 3);
/// assert_eq!(problem.turn_penalty(Turn::ForwardBackward), 5.0);
/// assert_eq!(problem.undirected().weight(0, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DirectedTspProblem {
    first: usize,
    last: Option<usize>,
    weights: WeightMatrix,
    turn_penalties: [f64; 4],
    undirected: TspProblem,
}

impl DirectedTspProblem {
    /// Creates a directed TSP.
    ///
    /// `weights` must have two rows per visit; `turn_penalties` is indexed by
    /// [`Turn::index`].
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or has an odd size, or if a
    /// terminal is out of range.
    pub fn new(
        first: usize,
        last: Option<usize>,
        weights: WeightMatrix,
        turn_penalties: [f64; 4],
    ) -> Result<Self> {
        let size = weights.size();
        if size == 0 || size % 2 != 0 {
            return Err(Error::InvalidMatrix {
                expected: (size / 2 + 1) * 2,
                actual: size,
            });
        }
        let count = size / 2;
        validate_terminals(first, last, count)?;

        let projected = WeightMatrix::from_fn(count, |from, to| min_side_weight(&weights, from, to));
        let undirected = TspProblem::new(first, last, projected)?;
        Ok(Self {
            first,
            last,
            weights,
            turn_penalties,
            undirected,
        })
    }

    /// Creates a closed directed TSP.
    pub fn closed(first: usize, weights: WeightMatrix, turn_penalties: [f64; 4]) -> Result<Self> {
        Self::new(first, Some(first), weights, turn_penalties)
    }

    /// Creates an open directed TSP.
    pub fn open(first: usize, weights: WeightMatrix, turn_penalties: [f64; 4]) -> Result<Self> {
        Self::new(first, None, weights, turn_penalties)
    }

    /// The side matrix.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// The turn-penalty table.
    pub fn turn_penalties(&self) -> &[f64; 4] {
        &self.turn_penalties
    }

    /// The undirected projection with min-side weights.
    pub fn undirected(&self) -> &TspProblem {
        &self.undirected
    }
}

impl DirectedProblem for DirectedTspProblem {
    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> Option<usize> {
        self.last
    }

    fn count(&self) -> usize {
        self.weights.size() / 2
    }

    #[inline]
    fn side_weight(&self, departure: usize, arrival: usize) -> f64 {
        self.weights.get(departure, arrival)
    }

    #[inline]
    fn turn_penalty(&self, turn: Turn) -> f64 {
        self.turn_penalties[turn.index()]
    }
}

fn min_side_weight(weights: &WeightMatrix, from: usize, to: usize) -> f64 {
    let mut min = f64::INFINITY;
    for departure in [from * 2, from * 2 + 1] {
        for arrival in [to * 2, to * 2 + 1] {
            min = min.min(weights.get(departure, arrival));
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::TourProblem;

    #[test]
    fn test_rejects_odd_matrix() {
        let err = DirectedTspProblem::closed(0, WeightMatrix::new(5), [0.0; 4]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidMatrix {
                expected: 6,
                actual: 5
            }
        );
        assert!(DirectedTspProblem::open(0, WeightMatrix::new(0), [0.0; 4]).is_err());
        assert!(DirectedTspProblem::new(0, Some(3), WeightMatrix::new(6), [0.0; 4]).is_err());
    }

    #[test]
    fn test_undirected_projection_takes_true_minimum() {
        let mut weights = WeightMatrix::from_fn(4, |_, _| 10.0);
        // 0 -> 1 over sides: 00 = 10, 01 = 7, 10 = 3, 11 = 9
        weights.set(0, 3, 7.0);
        weights.set(1, 2, 3.0);
        weights.set(1, 3, 9.0);
        let p = DirectedTspProblem::closed(0, weights, [0.0; 4]).unwrap();
        assert_eq!(p.undirected().weight(0, 1), 3.0);
        assert_eq!(p.undirected().weight(1, 0), 10.0);
        assert_eq!(p.undirected().count(), 2);
        assert_eq!(p.undirected().last(), Some(0));
    }

    #[test]
    fn test_empty_tour_uses_directed_terminals() {
        let p = DirectedTspProblem::new(1, Some(2), WeightMatrix::new(6), [0.0; 4]).unwrap();
        let tour = p.empty_tour();
        assert_eq!(tour.to_vec(), vec![4, 8]);
        assert!(tour.is_fixed_last(8));
    }
}
