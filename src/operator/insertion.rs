//! Insertion-based operators.

use super::one_shift::movable_visits;
use super::{Operator, Perturber};
use crate::objective::{Objective, WeightObjective};
use crate::problem::{cheapest_insertion, tour_weight, TourProblem};
use crate::tour::Tour;
use rand::Rng;

/// Unplaced visits of `problem`, in id order.
pub(crate) fn unplaced_visits<P: TourProblem + ?Sized>(problem: &P, tour: &Tour) -> Vec<usize> {
    problem.visits().filter(|&v| !tour.contains(v)).collect()
}

/// Inserts the globally cheapest unplaced visit if that improves the
/// fitness.
///
/// Respects [`TourProblem::weight_budget`]. Used as an improvement step for
/// problems where visiting more is better (selective TSP) and as a repair
/// step after removals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestInsertionOperator;

impl<P, O> Operator<P, O> for CheapestInsertionOperator
where
    P: TourProblem,
    O: Objective<P>,
{
    fn name(&self) -> String {
        "CI".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let candidates = unplaced_visits(problem, tour);
        let (visit, after, cost) = cheapest_insertion(problem, tour, &candidates)?;
        if let Some(budget) = problem.weight_budget() {
            if tour_weight(problem, tour) + cost > budget {
                return None;
            }
        }

        let before = objective.calculate(problem, tour);
        tour.insert_after(after, visit);
        let delta = objective.subtract(problem, before, objective.calculate(problem, tour));
        if objective.is_improvement(problem, delta) {
            log::trace!("CI: insert {visit} after {after} (cost {cost:.3})");
            Some(delta)
        } else {
            tour.remove(visit);
            None
        }
    }
}

/// Removes `level` random visits and reinserts each at its cheapest
/// position.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRemoveInsert;

impl<P, O> Perturber<P, O> for RandomRemoveInsert
where
    P: TourProblem,
    O: WeightObjective<P>,
{
    fn name(&self) -> String {
        "remove-insert".into()
    }

    fn perturb<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        let mut movable = movable_visits(tour);
        if movable.is_empty() {
            return None;
        }
        let before = tour_weight(problem, tour);

        let mut removed = Vec::with_capacity(level);
        for _ in 0..level.max(1).min(movable.len()) {
            let visit = movable.swap_remove(rng.random_range(0..movable.len()));
            tour.remove(visit);
            removed.push(visit);
        }
        for visit in removed {
            // Each removed visit fits somewhere, at worst on its old edge.
            if let Some((visit, after, _)) = cheapest_insertion(problem, tour, &[visit]) {
                tour.insert_after(after, visit);
            }
        }
        Some(objective.weight_fitness(before - tour_weight(problem, tour)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::tests::line;
    use crate::problem::WeightMatrix;
    use crate::tour::tests::assert_invariants;
    use crate::tsp::TspObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Budgeted {
        weights: WeightMatrix,
        budget: f64,
    }

    impl TourProblem for Budgeted {
        fn first(&self) -> usize {
            0
        }
        fn last(&self) -> Option<usize> {
            Some(0)
        }
        fn count(&self) -> usize {
            self.weights.size()
        }
        fn weight(&self, from: usize, to: usize) -> f64 {
            self.weights.get(from, to)
        }
        fn weight_budget(&self) -> Option<f64> {
            Some(self.budget)
        }
    }

    /// Scores a tour by how many visits it misses.
    struct Coverage;

    impl<P: TourProblem> Objective<P> for Coverage {
        type Fitness = f64;

        fn name(&self) -> &str {
            "coverage"
        }

        fn calculate(&self, problem: &P, tour: &Tour) -> f64 {
            (problem.count() - tour.count()) as f64
        }
    }

    #[test]
    fn test_cheapest_insertion_operator_grows_until_budget() {
        let p = Budgeted {
            weights: WeightMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs()),
            budget: 6.0,
        };
        let mut tour = p.empty_tour();
        let mut rng = StdRng::seed_from_u64(0);
        while CheapestInsertionOperator
            .apply(&p, &Coverage, &mut tour, &mut rng)
            .is_some()
        {
            assert_invariants(&tour);
        }
        assert!(tour_weight(&p, &tour) <= 6.0);
        assert_eq!(tour.count(), 4);
        assert!(!tour.contains(4));
    }

    #[test]
    fn test_cheapest_insertion_operator_rejects_worse_fitness() {
        let p = line(4, Some(0));
        let mut tour = Tour::closed([0, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(CheapestInsertionOperator
            .apply(&p, &TspObjective, &mut tour, &mut rng)
            .is_none());
        assert_eq!(tour.to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_remove_insert_keeps_all_visits() {
        let p = line(10, Some(0));
        let mut rng = StdRng::seed_from_u64(5);
        let mut tour = Tour::closed([0, 5, 2, 8, 1, 9, 3, 7, 4, 6]).unwrap();
        for level in 1..5 {
            let before = TspObjective.calculate(&p, &tour);
            let delta = RandomRemoveInsert
                .perturb(&p, &TspObjective, &mut tour, level, &mut rng)
                .unwrap();
            let after = TspObjective.calculate(&p, &tour);
            assert!((before - after - delta).abs() < 1e-9);
            assert_eq!(tour.count(), 10);
            assert_invariants(&tour);
        }
    }
}
