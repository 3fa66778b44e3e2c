use crate::objective::Objective;
use crate::operator::{movable_visits, Perturber};
use crate::problem::TourProblem;
use crate::tour::Tour;
use rand::Rng;

/// Drops `level` random visits without reinserting them.
///
/// Frees budget so the insertion step of the local search can try a
/// different selection of visits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRemoval;

impl<P, O> Perturber<P, O> for RandomRemoval
where
    P: TourProblem,
    O: Objective<P>,
{
    fn name(&self) -> String {
        "random-removal".into()
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
        let before = objective.calculate(problem, tour);
        for _ in 0..level.max(1).min(movable.len()) {
            let visit = movable.swap_remove(rng.random_range(0..movable.len()));
            tour.remove(visit);
        }
        Some(objective.subtract(problem, before, objective.calculate(problem, tour)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stsp::problem::tests::budget_line;
    use crate::stsp::StspObjective;
    use crate::tour::tests::assert_invariants;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_removes_level_visits() {
        let p = budget_line(8, 100.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut tour = Tour::closed([0, 1, 2, 3, 4, 5]).unwrap();
        let delta = RandomRemoval
            .perturb(&p, &StspObjective, &mut tour, 2, &mut rng)
            .unwrap();
        assert_eq!(tour.count(), 4);
        assert!(tour.contains(0));
        assert_eq!(delta.visits, 2);
        assert_invariants(&tour);
    }

    #[test]
    fn test_nothing_to_remove() {
        let p = budget_line(4, 100.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut tour = Tour::closed([0]).unwrap();
        assert!(RandomRemoval
            .perturb(&p, &StspObjective, &mut tour, 1, &mut rng)
            .is_none());
    }
}
