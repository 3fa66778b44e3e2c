//! 2-opt edge exchange.

use super::Operator;
use crate::objective::WeightObjective;
use crate::problem::TourProblem;
use crate::tour::Tour;
use rand::Rng;

/// First-improvement 2-opt.
///
/// Replaces the edges `a -> s1` and `sk -> b` by `a -> sk` and `s1 -> b`,
/// reversing the sub-path `s1..sk`. Both travel directions of the reversed
/// sub-path are priced, so asymmetric matrices are handled correctly.
///
/// On open tours the final sub-path may be reversed as well (there is no
/// `b`). The first visit and a fixed last visit never move.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

/// Reverse the sub-path after `before` up to and including `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Reversal {
    pub(crate) before: usize,
    pub(crate) end: usize,
    pub(crate) delta: f64,
}

/// Scans the tour for the first reversal whose weight decrease satisfies
/// `accept`.
///
/// `accept` receives the weight delta and the positions `(i, j)` of the
/// visit before the segment and of the segment end in `seq`.
pub(crate) fn first_reversal<P, F>(problem: &P, tour: &Tour, mut accept: F) -> Option<Reversal>
where
    P: TourProblem + ?Sized,
    F: FnMut(f64, &[usize], usize, usize) -> bool,
{
    let seq = tour.to_vec();
    let n = seq.len();
    if n < 3 {
        return None;
    }
    let w = |a: usize, b: usize| problem.weight(a, b);

    // forward[k]: weight of seq[0..=k] walked forwards;
    // backward[k]: the same prefix walked backwards.
    let mut forward = vec![0.0; n];
    let mut backward = vec![0.0; n];
    for k in 1..n {
        forward[k] = forward[k - 1] + w(seq[k - 1], seq[k]);
        backward[k] = backward[k - 1] + w(seq[k], seq[k - 1]);
    }

    let closed = tour.is_closed();
    let fixed = tour.last().is_some() && !closed;
    let last_end = if fixed { n - 2 } else { n - 1 };

    for i in 0..n - 2 {
        let a = seq[i];
        for j in i + 2..=last_end {
            let s1 = seq[i + 1];
            let sk = seq[j];
            let after = if j + 1 < n {
                Some(seq[j + 1])
            } else if closed {
                Some(seq[0])
            } else {
                None
            };

            let inner_forward = forward[j] - forward[i + 1];
            let inner_backward = backward[j] - backward[i + 1];
            let mut old = w(a, s1) + inner_forward;
            let mut new = w(a, sk) + inner_backward;
            if let Some(b) = after {
                old += w(sk, b);
                new += w(s1, b);
            }
            let delta = old - new;
            if accept(delta, &seq, i, j) {
                return Some(Reversal {
                    before: a,
                    end: sk,
                    delta,
                });
            }
        }
    }
    None
}

impl<P, O> Operator<P, O> for TwoOpt
where
    P: TourProblem,
    O: WeightObjective<P>,
{
    fn name(&self) -> String {
        "2-opt".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let found = first_reversal(problem, tour, |delta, _, _, _| {
            objective.is_improvement(problem, objective.weight_fitness(delta))
        })?;
        log::trace!(
            "2-opt: reverse after {} to {} (delta {:.3})",
            found.before,
            found.end,
            found.delta
        );
        tour.reverse(found.before, found.end);
        Some(objective.weight_fitness(found.delta))
    }
}
