//! 2-opt that respects time windows.

use super::problem::TspTwProblem;
use crate::objective::{Objective, IMPROVEMENT_EPSILON};
use crate::operator::{first_reversal, Operator};
use crate::tour::Tour;
use rand::Rng;

/// First-improvement 2-opt re-timing every candidate route.
///
/// A reversal is accepted when the reversed route is not later than the
/// current one and the objective improves. With [`TspTwObjective`] this
/// keeps feasible tours feasible; with [`TspTwFeasibleObjective`] it
/// reduces lateness.
///
/// [`TspTwObjective`]: super::TspTwObjective
/// [`TspTwFeasibleObjective`]: super::TspTwFeasibleObjective
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptTw;

/// Visits of `seq` with positions `i + 1..=j` reversed.
fn reversed(seq: &[usize], i: usize, j: usize) -> impl Iterator<Item = usize> + '_ {
    (0..seq.len()).map(move |k| {
        if k > i && k <= j {
            seq[i + 1 + j - k]
        } else {
            seq[k]
        }
    })
}

impl<O> Operator<TspTwProblem, O> for TwoOptTw
where
    O: Objective<TspTwProblem>,
{
    fn name(&self) -> String {
        "2-opt-tw".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &TspTwProblem,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let lateness = problem.evaluate(tour).lateness;
        let before = objective.calculate(problem, tour);
        let mut improved: Option<(Tour, O::Fitness)> = None;

        first_reversal(problem, tour, |_, seq, i, j| {
            let timing = problem.schedule(reversed(seq, i, j));
            if timing.lateness > lateness + IMPROVEMENT_EPSILON {
                return false;
            }
            let mut trial = tour.clone();
            trial.reverse(seq[i], seq[j]);
            let delta = objective.subtract(problem, before, objective.calculate(problem, &trial));
            if objective.is_improvement(problem, delta) {
                improved = Some((trial, delta));
                true
            } else {
                false
            }
        })?;

        let (trial, delta) = improved?;
        log::trace!("2-opt-tw: {tour} -> {trial}");
        *tour = trial;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::TwoOpt;
    use crate::problem::WeightMatrix;
    use crate::tour::tests::assert_invariants;
    use crate::tsp::TspObjective;
    use crate::tsptw::{TimeWindow, TspTwFeasibleObjective, TspTwObjective};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Open line of 4; visit 2 closes at 2, visit 1 opens at 3.
    fn problem() -> TspTwProblem {
        let times = WeightMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs());
        let mut windows = vec![TimeWindow::unlimited(); 4];
        windows[2] = TimeWindow::new(0.0, 2.0);
        windows[1] = TimeWindow::new(3.0, 10.0);
        TspTwProblem::open(0, times, windows).unwrap()
    }

    #[test]
    fn test_reversed_positions() {
        let seq = [0, 1, 2, 3, 4];
        assert_eq!(reversed(&seq, 0, 3).collect::<Vec<_>>(), vec![0, 3, 2, 1, 4]);
        assert_eq!(reversed(&seq, 2, 4).collect::<Vec<_>>(), vec![0, 1, 2, 4, 3]);
    }

    #[test]
    fn test_rejects_reversal_breaking_window() {
        let p = problem();
        let mut rng = StdRng::seed_from_u64(0);
        let mut tour = Tour::open([0, 2, 1, 3]).unwrap();
        assert_eq!(TspTwObjective.calculate(&p, &tour), 5.0);
        assert!(TwoOptTw.apply(&p, &TspTwObjective, &mut tour, &mut rng).is_none());
        assert_eq!(tour.to_vec(), vec![0, 2, 1, 3]);

        // Plain 2-opt ignores the windows.
        let delta = TwoOpt.apply(&p, &TspObjective, &mut tour, &mut rng).unwrap();
        assert_eq!(delta, 2.0);
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reduces_lateness() {
        let p = problem();
        let mut rng = StdRng::seed_from_u64(0);
        let mut tour = Tour::open([0, 1, 2, 3]).unwrap();
        assert_eq!(TspTwFeasibleObjective.calculate(&p, &tour), 2.0);
        let delta = TwoOptTw
            .apply(&p, &TspTwFeasibleObjective, &mut tour, &mut rng)
            .unwrap();
        assert_eq!(delta, 2.0);
        assert_eq!(tour.to_vec(), vec![0, 2, 1, 3]);
        assert_invariants(&tour);
    }

    #[test]
    fn test_shortens_feasible_route() {
        let times = WeightMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs());
        let p = TspTwProblem::closed(0, times, vec![TimeWindow::unlimited(); 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut tour = Tour::closed([0, 3, 2, 1, 4]).unwrap();
        let before = TspTwObjective.calculate(&p, &tour);
        let delta = TwoOptTw.apply(&p, &TspTwObjective, &mut tour, &mut rng).unwrap();
        let after = TspTwObjective.calculate(&p, &tour);
        assert!((before - after - delta).abs() < 1e-9);
        assert_invariants(&tour);
    }
}
