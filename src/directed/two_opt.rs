//! 2-opt on directed tours.

use super::helper::edge_weight;
use super::id::DirectedId;
use super::problem::DirectedProblem;
use crate::objective::WeightObjective;
use crate::operator::Operator;
use crate::tour::Tour;
use rand::Rng;

/// First-improvement 2-opt for directed tours.
///
/// Reversing a sub-path means travelling each of its visits the other way
/// round, so every reversed visit has its turn flipped (arrival and
/// departure sides swapped). Edge weights and turn penalties of the reversed
/// sub-path are priced in O(1) per candidate from prefix sums.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectedTwoOpt;

struct Prefix {
    /// Edge weights walking the sequence forwards.
    forward: Vec<f64>,
    /// Edge weights of the flipped visits walking backwards.
    backward: Vec<f64>,
    /// Turn penalties as they are.
    penalty: Vec<f64>,
    /// Turn penalties after flipping.
    flipped: Vec<f64>,
}

impl Prefix {
    fn new<P: DirectedProblem + ?Sized>(problem: &P, seq: &[usize]) -> Self {
        let n = seq.len();
        let mut prefix = Self {
            forward: vec![0.0; n],
            backward: vec![0.0; n],
            penalty: vec![0.0; n + 1],
            flipped: vec![0.0; n + 1],
        };
        for k in 0..n {
            let visit = DirectedId::from_raw(seq[k]);
            if k > 0 {
                let previous = DirectedId::from_raw(seq[k - 1]);
                prefix.forward[k] = prefix.forward[k - 1] + edge_weight(problem, seq[k - 1], seq[k]);
                prefix.backward[k] = prefix.backward[k - 1]
                    + problem.side_weight(visit.arrival_id(), previous.departure_id());
            }
            prefix.penalty[k + 1] = prefix.penalty[k] + problem.turn_penalty(visit.turn());
            prefix.flipped[k + 1] = prefix.flipped[k] + problem.turn_penalty(visit.turn().flip());
        }
        prefix
    }

    /// Penalty sum over positions `from..to`.
    fn penalty(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            0.0
        } else {
            self.penalty[to] - self.penalty[from]
        }
    }

    /// Flipped penalty sum over positions `from..to`.
    fn flipped(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            0.0
        } else {
            self.flipped[to] - self.flipped[from]
        }
    }
}

/// Finds the first improving directed reversal: `(before, end, delta)`.
fn first_directed_reversal<P, F>(problem: &P, tour: &Tour, mut accept: F) -> Option<(usize, usize, f64)>
where
    P: DirectedProblem + ?Sized,
    F: FnMut(f64) -> bool,
{
    let seq = tour.to_vec();
    let n = seq.len();
    if n < 3 {
        return None;
    }
    let prefix = Prefix::new(problem, &seq);
    let closed = tour.is_closed();
    let fixed = tour.last().is_some() && !closed;
    let last_end = if fixed { n - 2 } else { n - 1 };

    for i in 0..n - 2 {
        let a = seq[i];
        for j in i + 2..=last_end {
            let s1 = DirectedId::from_raw(seq[i + 1]);
            let sk = DirectedId::from_raw(seq[j]);
            let after = if j + 1 < n {
                Some(seq[j + 1])
            } else if closed {
                Some(seq[0])
            } else {
                None
            };

            let departure_a = DirectedId::from_raw(a).departure_id();
            let mut old = edge_weight(problem, a, s1.raw()) + prefix.forward[j]
                - prefix.forward[i + 1];
            // The flipped end is entered on its former departure side.
            let mut new = problem.side_weight(departure_a, sk.departure_id())
                + prefix.backward[j]
                - prefix.backward[i + 1];
            match after {
                Some(b) => {
                    let arrival_b = DirectedId::from_raw(b).arrival_id();
                    old += edge_weight(problem, sk.raw(), b);
                    new += problem.side_weight(s1.arrival_id(), arrival_b);
                    old += prefix.penalty(i + 1, j + 1);
                    new += prefix.flipped(i + 1, j + 1);
                }
                None => {
                    // `sk` ends an open tour and stops being charged; `s1`
                    // takes its place as the uncharged terminal.
                    old += prefix.penalty(i + 1, j);
                    new += prefix.flipped(i + 2, j + 1);
                }
            }

            let delta = old - new;
            if accept(delta) {
                return Some((a, sk.raw(), delta));
            }
        }
    }
    None
}

impl<P, O> Operator<P, O> for DirectedTwoOpt
where
    P: DirectedProblem,
    O: WeightObjective<P>,
{
    fn name(&self) -> String {
        "directed-2-opt".into()
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        _rng: &mut R,
    ) -> Option<O::Fitness> {
        let (before, end, delta) = first_directed_reversal(problem, tour, |delta| {
            objective.is_improvement(problem, objective.weight_fitness(delta))
        })?;

        let mut segment = Vec::new();
        let mut current = tour.next(before);
        while let Some(visit) = current {
            segment.push(visit);
            if visit == end {
                break;
            }
            current = tour.next(visit);
        }
        log::trace!(
            "directed-2-opt: reverse {} visits after {before} (delta {delta:.3})",
            segment.len()
        );
        tour.reverse(before, end);
        for visit in segment {
            tour.replace(visit, DirectedId::from_raw(visit).flip().raw());
        }
        Some(objective.weight_fitness(delta))
    }
}
