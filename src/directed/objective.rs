//! Directed total-weight objective.

use super::helper::tour_weight;
use super::problem::DirectedProblem;
use crate::objective::{Objective, WeightObjective};
use crate::tour::Tour;

/// Minimizes side-dependent edge weights plus turn penalties of a directed
/// tour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectedTspObjective;

impl<P: DirectedProblem> Objective<P> for DirectedTspObjective {
    type Fitness = f64;

    fn name(&self) -> &str {
        "DirectedTSP"
    }

    fn calculate(&self, problem: &P, tour: &Tour) -> f64 {
        tour_weight(problem, tour)
    }
}

impl<P: DirectedProblem> WeightObjective<P> for DirectedTspObjective {
    fn weight_fitness(&self, weight: f64) -> f64 {
        weight
    }
}
