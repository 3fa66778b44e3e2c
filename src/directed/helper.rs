//! Weight lookups on directed tours.
//!
//! Every directed operator and objective prices edges and turns through
//! these helpers, so they are the single place deciding which matrix cell a
//! directed edge uses and when a turn penalty is charged.
//!
//! A turn penalty is charged for every visit with both a predecessor and a
//! successor. The terminals of open and fixed tours pay none.

use super::id::{DirectedId, Turn};
use super::problem::DirectedProblem;
use crate::tour::Tour;

/// Cheapest weight between visits `from` and `to` over the four side
/// combinations.
pub fn min_weight<P: DirectedProblem + ?Sized>(problem: &P, from: usize, to: usize) -> f64 {
    let mut min = f64::INFINITY;
    for departure in [from * 2, from * 2 + 1] {
        for arrival in [to * 2, to * 2 + 1] {
            min = min.min(problem.side_weight(departure, arrival));
        }
    }
    min
}

/// Weight of the edge between two raw directed ids.
#[inline]
pub fn edge_weight<P: DirectedProblem + ?Sized>(problem: &P, from: usize, to: usize) -> f64 {
    problem.side_weight(
        DirectedId::from_raw(from).departure_id(),
        DirectedId::from_raw(to).arrival_id(),
    )
}

/// Penalty of `visit` at its current position in `tour`.
pub fn charged_penalty<P: DirectedProblem + ?Sized>(problem: &P, tour: &Tour, visit: usize) -> f64 {
    match (tour.previous(visit), tour.next(visit)) {
        (Some(prev), Some(_)) if prev != visit => {
            problem.turn_penalty(DirectedId::from_raw(visit).turn())
        }
        _ => 0.0,
    }
}

/// Total weight of a directed tour: edges plus charged turn penalties.
pub fn tour_weight<P: DirectedProblem + ?Sized>(problem: &P, tour: &Tour) -> f64 {
    let edges: f64 = tour
        .pairs()
        .map(|(from, to)| edge_weight(problem, from, to))
        .sum();
    let penalties: f64 = tour
        .triples()
        .map(|(_, visit, _)| problem.turn_penalty(DirectedId::from_raw(visit).turn()))
        .sum();
    edges + penalties
}

/// Turns worth considering for a visit with the given neighbours.
///
/// A side without a neighbour is irrelevant, so only one value of it is
/// tried: the first visit of a non-closed tour has its arrival side free,
/// the last visit its departure side.
pub fn legal_turns(has_previous: bool, has_next: bool) -> &'static [Turn] {
    const BOTH: [Turn; 4] = Turn::ALL;
    const DEPARTURE_ONLY: [Turn; 2] = [Turn::ForwardForward, Turn::ForwardBackward];
    const ARRIVAL_ONLY: [Turn; 2] = [Turn::ForwardForward, Turn::BackwardForward];
    const NEITHER: [Turn; 1] = [Turn::ForwardForward];
    match (has_previous, has_next) {
        (true, true) => &BOTH,
        (false, true) => &DEPARTURE_ONLY,
        (true, false) => &ARRIVAL_ONLY,
        (false, false) => &NEITHER,
    }
}

/// Cost of placing `id` with `turn` between `previous` and `next` (raw
/// directed ids): the adjacent edges plus the turn penalty when both
/// neighbours exist.
pub fn placement_cost<P: DirectedProblem + ?Sized>(
    problem: &P,
    previous: Option<usize>,
    id: usize,
    turn: Turn,
    next: Option<usize>,
) -> f64 {
    let visit = DirectedId::new(id, turn).raw();
    let mut cost = 0.0;
    if let Some(p) = previous {
        cost += edge_weight(problem, p, visit);
    }
    if let Some(n) = next {
        cost += edge_weight(problem, visit, n);
    }
    if previous.is_some() && next.is_some() {
        cost += problem.turn_penalty(turn);
    }
    cost
}

/// The cheapest legal turn for `id` between `previous` and `next`.
pub fn best_turn<P: DirectedProblem + ?Sized>(
    problem: &P,
    previous: Option<usize>,
    id: usize,
    next: Option<usize>,
) -> (Turn, f64) {
    let mut best = (Turn::ForwardForward, f64::INFINITY);
    for &turn in legal_turns(previous.is_some(), next.is_some()) {
        let cost = placement_cost(problem, previous, id, turn, next);
        if cost < best.1 {
            best = (turn, cost);
        }
    }
    best
}

/// One pass over the tour re-choosing every visit's turn.
///
/// Returns the total weight decrease (zero if nothing changed).
pub fn optimize_turns<P: DirectedProblem + ?Sized>(problem: &P, tour: &mut Tour) -> f64 {
    let visits = tour.to_vec();
    let mut total = 0.0;
    for raw in visits {
        // A closed tour with a single visit loops onto itself.
        let previous = tour.previous(raw).filter(|&p| p != raw);
        let next = tour.next(raw).filter(|&n| n != raw);
        let directed = DirectedId::from_raw(raw);
        let current = placement_cost(problem, previous, directed.id(), directed.turn(), next);
        let (turn, cost) = best_turn(problem, previous, directed.id(), next);
        if current - cost > crate::objective::IMPROVEMENT_EPSILON {
            tour.replace(raw, directed.with_turn(turn).raw());
            total += current - cost;
        }
    }
    total
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::directed::{build_directed_id, DirectedTspProblem};
    use crate::problem::WeightMatrix;

    /// Visits on a line; travelling "forward" (side 0 -> side 0 towards
    /// higher ids, side 1 -> side 1 towards lower ids) costs the distance,
    /// any other side combination costs three times as much.
    pub(crate) fn directed_line(n: usize, last: Option<usize>, penalties: [f64; 4]) -> DirectedTspProblem {
        let weights = WeightMatrix::from_fn(2 * n, |i, j| {
            let (from, to) = (i / 2, j / 2);
            let distance = (from as f64 - to as f64).abs();
            let forward = (to > from && i % 2 == 0 && j % 2 == 0)
                || (to < from && i % 2 == 1 && j % 2 == 1);
            if from == to {
                0.0
            } else if forward {
                distance
            } else {
                3.0 * distance
            }
        });
        DirectedTspProblem::new(0, last, weights, penalties).unwrap()
    }

    /// Lifts plain ids into a directed tour with the given turns.
    pub(crate) fn directed_tour(visits: &[(usize, Turn)], last: Option<usize>) -> Tour {
        let raw: Vec<usize> = visits.iter().map(|&(v, t)| build_directed_id(v, t)).collect();
        let last = last.map(|l| {
            let (_, turn) = visits.iter().find(|(v, _)| *v == l).copied().unwrap();
            build_directed_id(l, turn)
        });
        Tour::new(raw, last).unwrap()
    }

    #[test]
    fn test_min_weight_is_true_minimum() {
        let mut weights = WeightMatrix::from_fn(4, |_, _| 9.0);
        weights.set(1, 2, 4.0);
        weights.set(0, 3, 2.0);
        let p = DirectedTspProblem::closed(0, weights, [0.0; 4]).unwrap();
        assert_eq!(min_weight(&p, 0, 1), 2.0);
        assert_eq!(min_weight(&p, 1, 0), 9.0);
    }

    #[test]
    fn test_tour_weight_charges_interior_turns_only() {
        use Turn::*;
        let p = directed_line(3, None, [0.0, 10.0, 100.0, 1000.0]);
        let tour = directed_tour(
            &[(0, BackwardBackward), (1, ForwardBackward), (2, BackwardForward)],
            None,
        );
        // 0 -> 1 departs side 1, arrives side 0: 3; 1 -> 2 departs side 1,
        // arrives side 1: 3; only visit 1 is charged.
        assert_eq!(tour_weight(&p, &tour), 6.0 + 10.0);

        let closed = directed_line(3, Some(0), [0.0, 10.0, 100.0, 1000.0]);
        let cycle = directed_tour(&[(0, ForwardForward), (1, ForwardForward), (2, ForwardForward)], Some(0));
        // 1 + 1 + (2 -> 0 backwards on side 0: 3 * 2)
        assert_eq!(tour_weight(&closed, &cycle), 8.0);
    }

    #[test]
    fn test_legal_turns_at_terminals() {
        assert_eq!(legal_turns(true, true).len(), 4);
        assert!(legal_turns(false, true)
            .iter()
            .all(|t| t.arrival_offset() == 0));
        assert!(legal_turns(true, false)
            .iter()
            .all(|t| t.departure_offset() == 0));
        assert_eq!(legal_turns(true, false).len(), 2);
    }

    #[test]
    fn test_optimize_turns_reports_decrease() {
        use Turn::*;
        let p = directed_line(4, None, [0.0, 5.0, 5.0, 0.0]);
        let mut tour = directed_tour(
            &[(0, ForwardBackward), (1, BackwardBackward), (2, ForwardBackward), (3, ForwardForward)],
            None,
        );
        let before = tour_weight(&p, &tour);
        let mut decrease = 0.0;
        loop {
            let d = optimize_turns(&p, &mut tour);
            if d == 0.0 {
                break;
            }
            decrease += d;
        }
        let after = tour_weight(&p, &tour);
        assert!((before - after - decrease).abs() < 1e-9);
        assert_eq!(after, 3.0);
    }
}
