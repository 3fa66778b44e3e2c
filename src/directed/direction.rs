//! Turn optimization.

use super::helper::optimize_turns;
use super::problem::DirectedProblem;
use crate::objective::WeightObjective;
use crate::operator::Operator;
use crate::tour::Tour;
use rand::Rng;

/// Re-chooses the turn of every visit given its neighbours.
///
/// Each visit keeps its position; only its directed id is rewritten in
/// place. One call is a single pass in tour order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionLocalSearch;

impl<P, O> Operator<P, O> for DirectionLocalSearch
where
    P: DirectedProblem,
    O: WeightObjective<P>,
{
    fn name(&self) -> String {
        "direction".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let decrease = optimize_turns(problem, tour);
        if decrease > 0.0 {
            log::trace!("direction: turns improved by {decrease:.3}");
            Some(objective.weight_fitness(decrease))
        } else {
            None
        }
    }
}
