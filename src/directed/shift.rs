//! Random relocation of directed visits.

use super::helper::{best_turn, tour_weight};
use super::id::DirectedId;
use super::problem::DirectedProblem;
use crate::objective::WeightObjective;
use crate::operator::{movable_visits, Perturber};
use crate::tour::Tour;
use rand::Rng;

/// Moves `level` random visits after random predecessors, re-choosing the
/// turn of each moved visit for its new neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectedRandomShift;

impl<P, O> Perturber<P, O> for DirectedRandomShift
where
    P: DirectedProblem,
    O: WeightObjective<P>,
{
    fn name(&self) -> String {
        "directed-random-shift".into()
    }

    /// # Panics
    ///
    /// Panics if a sampled shift cannot be applied; candidates are drawn so
    /// that every shift is structurally valid.
    fn perturb<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        if movable_visits(tour).is_empty() {
            return None;
        }
        let before_weight = tour_weight(problem, tour);

        for _ in 0..level.max(1) {
            let customers = movable_visits(tour);
            let customer = customers[rng.random_range(0..customers.len())];
            let targets: Vec<usize> = tour
                .iter()
                .filter(|&v| v != customer && !tour.is_fixed_last(v))
                .collect();
            if targets.is_empty() {
                break;
            }
            let before = targets[rng.random_range(0..targets.len())];
            let Some(shift) = tour.shift_after(customer, before) else {
                panic!("shift of {customer} after {before} broke the tour");
            };

            let directed = DirectedId::from_raw(customer);
            let (turn, _) = best_turn(problem, Some(before), directed.id(), shift.new_after);
            tour.replace(customer, directed.with_turn(turn).raw());
        }

        Some(objective.weight_fitness(before_weight - tour_weight(problem, tour)))
    }
}
