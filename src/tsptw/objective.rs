//! Time-window objectives.
//!
//! The same tour is scored two ways: [`TspTwFeasibleObjective`] measures how
//! late it is (zero once every window is met), [`TspTwObjective`] measures
//! its duration and rejects late tours outright. A feasibility search seeds
//! the duration search through [`Converted`](crate::solver::Converted).

use super::problem::TspTwProblem;
use crate::objective::{Objective, ShiftObjective};
use crate::tour::Tour;

/// Prices a relocation by timing the shifted tour.
fn shifted<F>(tour: &Tour, customer: usize, before: usize, score: F) -> Option<f64>
where
    F: Fn(&Tour) -> f64,
{
    let mut trial = tour.clone();
    trial.shift_after(customer, before)?;
    Some(score(&trial))
}

/// Total lateness over all visits.
#[derive(Debug, Clone, Copy, Default)]
pub struct TspTwFeasibleObjective;

impl Objective<TspTwProblem> for TspTwFeasibleObjective {
    type Fitness = f64;

    fn name(&self) -> &str {
        "TSPTW-feasible"
    }

    fn is_zero(&self, _problem: &TspTwProblem, fitness: f64) -> bool {
        fitness <= crate::objective::IMPROVEMENT_EPSILON
    }

    fn calculate(&self, problem: &TspTwProblem, tour: &Tour) -> f64 {
        problem.evaluate(tour).lateness
    }
}

impl ShiftObjective<TspTwProblem> for TspTwFeasibleObjective {
    fn if_shift_after(
        &self,
        problem: &TspTwProblem,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        let current = problem.evaluate(tour).lateness;
        let after = shifted(tour, customer, before, |t| problem.evaluate(t).lateness)?;
        Some(current - after)
    }
}

/// Tour duration (travel plus waiting); infinite for late tours.
#[derive(Debug, Clone, Copy, Default)]
pub struct TspTwObjective;

impl TspTwObjective {
    fn score(problem: &TspTwProblem, tour: &Tour) -> f64 {
        let timing = problem.evaluate(tour);
        if timing.lateness > crate::objective::IMPROVEMENT_EPSILON {
            f64::INFINITY
        } else {
            timing.time
        }
    }
}

impl Objective<TspTwProblem> for TspTwObjective {
    type Fitness = f64;

    fn name(&self) -> &str {
        "TSPTW"
    }

    fn calculate(&self, problem: &TspTwProblem, tour: &Tour) -> f64 {
        Self::score(problem, tour)
    }
}

impl ShiftObjective<TspTwProblem> for TspTwObjective {
    /// Returns `None` for relocations that make the tour late.
    fn if_shift_after(
        &self,
        problem: &TspTwProblem,
        tour: &Tour,
        customer: usize,
        before: usize,
    ) -> Option<f64> {
        let after = shifted(tour, customer, before, |t| Self::score(problem, t))?;
        if after.is_infinite() {
            return None;
        }
        Some(Self::score(problem, tour) - after)
    }
}
