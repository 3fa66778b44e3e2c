//! Total-weight objective.

use crate::objective::{Objective, ShiftObjective, WeightObjective};
use crate::problem::{shift_delta, tour_weight, TourProblem};
use crate::tour::Tour;

/// Minimizes the total weight of the tour.
///
/// Works with any [`TourProblem`], which is how time-windowed or selective
/// problems are scored "as if" they were plain TSPs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TspObjective;

impl<P: TourProblem> Objective<P> for TspObjective {
    type Fitness = f64;

    fn name(&self) -> &str {
        "TSP"
    }

    fn calculate(&self, problem: &P, tour: &Tour) -> f64 {
        tour_weight(problem, tour)
    }
}

impl<P: TourProblem> WeightObjective<P> for TspObjective {
    fn weight_fitness(&self, weight: f64) -> f64 {
        weight
    }
}

impl<P: TourProblem> ShiftObjective<P> for TspObjective {
    fn if_shift_after(&self, problem: &P, tour: &Tour, customer: usize, before: usize) -> Option<f64> {
        shift_delta(problem, tour, customer, before)
    }
}
