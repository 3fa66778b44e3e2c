//! Single-visit relocation (1-shift, Or-opt of length one).

use super::{Operator, Perturber};
use crate::objective::{Objective, ShiftObjective};
use crate::tour::Tour;
use rand::Rng;
use std::cmp::Ordering;

/// Visits that may be relocated: everything except the terminals.
pub(crate) fn movable_visits(tour: &Tour) -> Vec<usize> {
    tour.iter()
        .filter(|&v| v != tour.first() && !tour.is_fixed_last(v))
        .collect()
}

/// Best-improvement relocation of one visit.
///
/// Prices every `(customer, before)` pair with
/// [`ShiftObjective::if_shift_after`] and applies the best improving one.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShiftLocalSearch;

impl<P, O> Operator<P, O> for OneShiftLocalSearch
where
    O: ShiftObjective<P>,
{
    fn name(&self) -> String {
        "1-shift".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let customers = movable_visits(tour);
        let mut best: Option<(usize, usize, O::Fitness)> = None;

        for &customer in &customers {
            for before in tour.iter() {
                if before == customer || tour.is_fixed_last(before) {
                    continue;
                }
                let Some(delta) = objective.if_shift_after(problem, tour, customer, before)
                else {
                    continue;
                };
                if !objective.is_improvement(problem, delta) {
                    continue;
                }
                let better = best.is_none_or(|(_, _, current)| {
                    objective.compare(problem, delta, current) == Ordering::Greater
                });
                if better {
                    best = Some((customer, before, delta));
                }
            }
        }

        let (customer, before, _) = best?;
        log::trace!("1-shift: move {customer} after {before}");
        objective.shift_after(problem, tour, customer, before)
    }
}

/// Random relocations used as a VNS shaking step.
///
/// At level `k` it attempts `k` random `(customer, before)` moves through
/// [`ShiftObjective::shift_after`]; infeasible trials are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShift;

impl<P, O> Perturber<P, O> for RandomShift
where
    O: ShiftObjective<P>,
{
    fn name(&self) -> String {
        "random-shift".into()
    }

    fn perturb<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        let customers = movable_visits(tour);
        if customers.is_empty() {
            return None;
        }
        let mut total: Option<O::Fitness> = None;

        for _ in 0..level.max(1) {
            let customer = customers[rng.random_range(0..customers.len())];
            let targets: Vec<usize> = tour
                .iter()
                .filter(|&v| v != customer && !tour.is_fixed_last(v))
                .collect();
            if targets.is_empty() {
                break;
            }
            let before = targets[rng.random_range(0..targets.len())];
            if let Some(delta) = objective.shift_after(problem, tour, customer, before) {
                total = Some(match total {
                    Some(t) => objective.add(problem, t, delta),
                    None => delta,
                });
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::tests::line;
    use crate::tour::tests::assert_invariants;
    use crate::tsp::TspObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_shift_fixes_misplaced_visit() {
        let p = line(6, Some(0));
        let mut tour = Tour::closed([0, 1, 4, 2, 3, 5]).unwrap();
        let before = TspObjective.calculate(&p, &tour);
        let mut rng = StdRng::seed_from_u64(0);
        let delta = OneShiftLocalSearch
            .apply(&p, &TspObjective, &mut tour, &mut rng)
            .unwrap();
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert!((before - TspObjective.calculate(&p, &tour) - delta).abs() < 1e-9);
    }

    #[test]
    fn test_one_shift_noop_on_optimum() {
        let p = line(5, None);
        let mut tour = Tour::open([0, 1, 2, 3, 4]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(OneShiftLocalSearch
            .apply(&p, &TspObjective, &mut tour, &mut rng)
            .is_none());
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_random_shift_reports_exact_delta() {
        let p = line(8, Some(7));
        let mut rng = StdRng::seed_from_u64(11);
        for level in 1..6 {
            let mut tour = Tour::new(0..8, Some(7)).unwrap();
            let before = TspObjective.calculate(&p, &tour);
            if let Some(delta) = RandomShift.perturb(&p, &TspObjective, &mut tour, level, &mut rng) {
                let after = TspObjective.calculate(&p, &tour);
                assert!((before - after - delta).abs() < 1e-9);
            }
            assert_invariants(&tour);
            assert_eq!(tour.first(), 0);
            assert_eq!(tour.tail(), 7);
        }
    }

    #[test]
    fn test_random_shift_on_terminals_only() {
        let p = line(2, Some(1));
        let mut tour = Tour::new([0, 1], Some(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(RandomShift
            .perturb(&p, &TspObjective, &mut tour, 3, &mut rng)
            .is_none());
    }
}
