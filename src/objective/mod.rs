//! Objective abstraction.
//!
//! An [`Objective`] scores a `(problem, tour)` pair and provides the fitness
//! algebra used by every operator and strategy. Objectives are generic over
//! the problem type so the same tour representation can be scored in
//! different ways, e.g. a time-windowed tour by its lateness (feasibility)
//! or by its duration (cost).
//!
//! Two capability traits refine [`Objective`]:
//!
//! - [`WeightObjective`]: fitness is linear in tour weight, so operators that
//!   compute weight deltas (2-opt, insertion) can report fitness deltas.
//! - [`ShiftObjective`]: the objective knows how to price and apply a single
//!   visit relocation incrementally (Or-opt / 1-shift).

mod fitness;

pub use fitness::{Fitness, IMPROVEMENT_EPSILON};

use crate::tour::Tour;
use std::cmp::Ordering;

/// Fitness algebra and scoring function for a problem type.
///
/// The algebra methods take the problem so an objective may depend on
/// problem data; the defaults delegate to the [`Fitness`] implementation.
pub trait Objective<P>: Send + Sync {
    /// The fitness value type.
    type Fitness: Fitness;

    /// Human-readable objective name.
    fn name(&self) -> &str;

    /// The additive identity.
    fn zero(&self) -> Self::Fitness {
        Self::Fitness::zero()
    }

    /// The infeasible sentinel.
    fn infinite(&self) -> Self::Fitness {
        Self::Fitness::infinite()
    }

    /// Returns `true` if `fitness` equals zero.
    fn is_zero(&self, _problem: &P, fitness: Self::Fitness) -> bool {
        fitness.compare(&Self::Fitness::zero()) == Ordering::Equal
    }

    /// `a + b`.
    fn add(&self, _problem: &P, a: Self::Fitness, b: Self::Fitness) -> Self::Fitness {
        a.add(b)
    }

    /// `a - b`.
    fn subtract(&self, _problem: &P, a: Self::Fitness, b: Self::Fitness) -> Self::Fitness {
        a.subtract(b)
    }

    /// `Less` if `a` is strictly better than `b`.
    fn compare(&self, _problem: &P, a: Self::Fitness, b: Self::Fitness) -> Ordering {
        a.compare(&b)
    }

    /// Returns `true` if the `before - after` delta is an improvement.
    fn is_improvement(&self, _problem: &P, delta: Self::Fitness) -> bool {
        delta.is_improvement()
    }

    /// Scores a tour from scratch.
    fn calculate(&self, problem: &P, tour: &Tour) -> Self::Fitness;
}

/// An objective whose fitness is linear in the tour weight.
pub trait WeightObjective<P>: Objective<P> {
    /// The fitness delta corresponding to a weight delta.
    fn weight_fitness(&self, weight: f64) -> Self::Fitness;
}

/// An objective that can price and apply single-visit relocations.
pub trait ShiftObjective<P>: Objective<P> {
    /// Prices moving `customer` right after `before` without mutating the
    /// tour.
    ///
    /// Returns the `before - after` delta, or `None` if the move is
    /// structurally invalid or infeasible.
    fn if_shift_after(
        &self,
        problem: &P,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<Self::Fitness>;

    /// Moves `customer` right after `before` and reports the delta.
    ///
    /// Returns `None`, leaving the tour unchanged, if the move is invalid or
    /// infeasible.
    fn shift_after(
        &self,
        problem: &P,
        tour: &mut Tour,
        customer: usize,
        before: usize,
    ) -> Option<Self::Fitness> {
        let delta = self.if_shift_after(problem, tour, customer, before)?;
        tour.shift_after(customer, before)?;
        Some(delta)
    }
}

/// A tour paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<F> {
    /// The tour.
    pub tour: Tour,
    /// Fitness of `tour` under the objective that produced it.
    pub fitness: F,
}

impl<F: Fitness> Candidate<F> {
    /// Pairs a tour with an already known fitness.
    pub fn new(tour: Tour, fitness: F) -> Self {
        Self { tour, fitness }
    }

    /// Scores `tour` with `objective`.
    pub fn evaluate<P, O>(problem: &P, objective: &O, tour: Tour) -> Self
    where
        O: Objective<P, Fitness = F>,
    {
        let fitness = objective.calculate(problem, &tour);
        Self { tour, fitness }
    }

    /// Returns `true` if `self` is strictly better than `other`.
    pub fn is_better<P, O>(&self, problem: &P, objective: &O, other: &Self) -> bool
    where
        O: Objective<P, Fitness = F>,
    {
        objective.compare(problem, self.fitness, other.fitness) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::tests::line;
    use crate::tsp::TspObjective;

    #[test]
    fn test_candidate_evaluate_and_compare() {
        let p = line(4, Some(0));
        let good = Candidate::evaluate(&p, &TspObjective, Tour::closed([0, 1, 2, 3]).unwrap());
        let bad = Candidate::evaluate(&p, &TspObjective, Tour::closed([0, 2, 1, 3]).unwrap());
        assert_eq!(good.fitness, 6.0);
        assert_eq!(bad.fitness, 8.0);
        assert!(good.is_better(&p, &TspObjective, &bad));
        assert!(!bad.is_better(&p, &TspObjective, &good));
        assert!(!good.is_better(&p, &TspObjective, &good.clone()));
    }

    #[test]
    fn test_default_algebra() {
        let p = line(2, None);
        let o = TspObjective;
        assert!(Objective::<_>::is_zero(&o, &p, 0.0));
        assert_eq!(o.add(&p, 1.5, 2.0), 3.5);
        assert_eq!(o.subtract(&p, 1.5, 2.0), -0.5);
        assert_eq!(o.compare(&p, f64::INFINITY, 3.0), Ordering::Greater);
        assert!(o.is_improvement(&p, 0.5));
    }
}
