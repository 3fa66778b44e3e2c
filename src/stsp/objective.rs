//! Selective-TSP fitness and objective.

use super::problem::StspProblem;
use crate::objective::{
    Fitness, Objective, ShiftObjective, WeightObjective, IMPROVEMENT_EPSILON,
};
use crate::problem::{shift_delta, tour_weight};
use crate::tour::Tour;
use std::cmp::Ordering;

/// Visit count first, weight second.
///
/// More visits is better; at equal visits lower weight is better. As a
/// delta (`before - after`) it is an improvement when visits were gained or
/// weight was saved at the same visit count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StspFitness {
    /// Total tour weight.
    pub weight: f64,
    /// Number of visits in the tour.
    pub visits: i64,
}

impl StspFitness {
    /// Pairs a weight with a visit count.
    pub fn new(weight: f64, visits: i64) -> Self {
        Self { weight, visits }
    }
}

impl Fitness for StspFitness {
    fn zero() -> Self {
        Self::new(0.0, 0)
    }

    fn infinite() -> Self {
        Self::new(f64::INFINITY, 0)
    }

    fn add(self, other: Self) -> Self {
        Self::new(self.weight + other.weight, self.visits.saturating_add(other.visits))
    }

    fn subtract(self, other: Self) -> Self {
        Self::new(self.weight - other.weight, self.visits.saturating_sub(other.visits))
    }

    fn compare(&self, other: &Self) -> Ordering {
        other
            .visits
            .cmp(&self.visits)
            .then_with(|| self.weight.total_cmp(&other.weight))
    }

    fn is_improvement(self) -> bool {
        self.visits < 0 || (self.visits == 0 && self.weight > IMPROVEMENT_EPSILON)
    }

    /// Negated visit count with the weight folded into the fraction, so the
    /// scalar orders like [`compare`](Fitness::compare) for non-negative
    /// weights.
    fn to_f64(self) -> f64 {
        if self.weight.is_infinite() {
            return f64::INFINITY;
        }
        let w = self.weight.abs();
        -(self.visits as f64) + self.weight.signum() * w / (1.0 + w)
    }
}

/// Maximizes the number of visits within the weight budget, then minimizes
/// the weight. Tours over budget are infinite.
#[derive(Debug, Clone, Copy, Default)]
pub struct StspObjective;

impl Objective<StspProblem> for StspObjective {
    type Fitness = StspFitness;

    fn name(&self) -> &str {
        "STSP"
    }

    fn calculate(&self, problem: &StspProblem, tour: &Tour) -> StspFitness {
        let weight = tour_weight(problem, tour);
        if weight > problem.max_weight() + IMPROVEMENT_EPSILON {
            StspFitness::infinite()
        } else {
            StspFitness::new(weight, tour.count() as i64)
        }
    }
}

impl WeightObjective<StspProblem> for StspObjective {
    fn weight_fitness(&self, weight: f64) -> StspFitness {
        StspFitness::new(weight, 0)
    }
}

impl ShiftObjective<StspProblem> for StspObjective {
    /// Returns `None` for relocations that exceed the budget.
    fn if_shift_after(
        &self,
        problem: &StspProblem,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<StspFitness> {
        let delta = shift_delta(problem, tour, customer, before)?;
        if tour_weight(problem, tour) - delta > problem.max_weight() + IMPROVEMENT_EPSILON {
            return None;
        }
        Some(StspFitness::new(delta, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stsp::problem::tests::budget_line;

    #[test]
    fn test_more_visits_beat_lower_weight() {
        let many = StspFitness::new(10.0, 5);
        let few = StspFitness::new(2.0, 3);
        assert_eq!(many.compare(&few), Ordering::Less);
        assert_eq!(
            StspFitness::new(4.0, 3).compare(&StspFitness::new(6.0, 3)),
            Ordering::Less
        );
        assert_eq!(StspFitness::infinite().compare(&few), Ordering::Greater);
        assert!(many.to_f64() < few.to_f64());
        assert!(StspFitness::new(4.0, 3).to_f64() < StspFitness::new(6.0, 3).to_f64());
    }

    #[test]
    fn test_delta_improvement() {
        let before = StspFitness::new(6.0, 3);
        let gained = before.subtract(StspFitness::new(9.0, 4));
        assert!(gained.is_improvement());
        let saved = before.subtract(StspFitness::new(5.0, 3));
        assert!(saved.is_improvement());
        let lost = before.subtract(StspFitness::new(1.0, 2));
        assert!(!lost.is_improvement());
        assert!(!StspFitness::zero().is_improvement());
    }

    #[test]
    fn test_objective_respects_budget() {
        let p = budget_line(6, 6.0);
        let within = Tour::closed([0, 1, 2, 3]).unwrap();
        let over = Tour::closed([0, 1, 2, 3, 4]).unwrap();
        assert_eq!(StspObjective.calculate(&p, &within), StspFitness::new(6.0, 4));
        assert_eq!(StspObjective.calculate(&p, &over), StspFitness::infinite());
    }

    #[test]
    fn test_shift_rejects_over_budget() {
        let p = budget_line(6, 6.0);
        let mut tour = Tour::closed([0, 1, 2, 3]).unwrap();
        // 0-2-1-3-0 weighs 2+1+2+3 = 8.
        assert!(StspObjective.shift_after(&p, &mut tour, 1, 2).is_none());
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);

        let mut tour = Tour::closed([0, 2, 1, 3]).unwrap();
        let delta = StspObjective.shift_after(&p, &mut tour, 1, 0).unwrap();
        assert_eq!(delta, StspFitness::new(2.0, 0));
    }
}
