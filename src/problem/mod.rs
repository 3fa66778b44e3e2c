//! Read-only problem accessors.
//!
//! Every undirected problem variant (plain TSP, TSP with time windows,
//! selective TSP) implements [`TourProblem`], which exposes the terminals,
//! the number of visits and the travel weight between two visits. Generic
//! operators only ever see this view, so a time-windowed problem can always
//! be optimized "as if" it were a plain TSP.
//!
//! The weight helpers in this module ([`tour_weight`], [`shift_delta`],
//! [`insertion_cost`]) are the single place where tour edges are priced.

mod matrix;

pub use matrix::WeightMatrix;

use crate::error::{Error, Result};
use crate::tour::Tour;
use std::ops::Range;

/// An undirected tour problem over a weight matrix.
pub trait TourProblem: Send + Sync {
    /// The visit every tour starts at.
    fn first(&self) -> usize;

    /// The designated last visit (`Some(first)` for closed tours).
    fn last(&self) -> Option<usize>;

    /// Number of visits; visit ids are `0..count()`.
    fn count(&self) -> usize;

    /// Travel weight from `from` to `to`.
    fn weight(&self, from: usize, to: usize) -> f64;

    /// Upper bound on the total tour weight, if the problem has one.
    fn weight_budget(&self) -> Option<f64> {
        None
    }

    /// The visit ids of the problem.
    fn visits(&self) -> Range<usize> {
        0..self.count()
    }

    /// The smallest tour honouring the terminals of the problem.
    fn empty_tour(&self) -> Tour {
        Tour::from_terminals(self.first(), self.last())
    }
}

/// Checks that the terminals are valid visit ids.
pub(crate) fn validate_terminals(first: usize, last: Option<usize>, count: usize) -> Result<()> {
    for visit in std::iter::once(first).chain(last) {
        if visit >= count {
            return Err(Error::VisitOutOfRange { visit, count });
        }
    }
    Ok(())
}

/// Total weight of the tour's edges (including the closing edge of a closed
/// tour).
pub fn tour_weight<P: TourProblem + ?Sized>(problem: &P, tour: &Tour) -> f64 {
    tour.pairs().map(|(from, to)| problem.weight(from, to)).sum()
}

/// Weight decrease obtained by moving `customer` right after `before`,
/// without touching the tour.
///
/// Returns `None` if the move is structurally invalid (see
/// [`Tour::shift_after`]). A positive value means the tour gets cheaper.
pub fn shift_delta<P: TourProblem + ?Sized>(
    problem: &P,
    tour: &Tour,
    customer: usize,
    before: usize,
) -> Option<f64> {
    if customer == before
        || customer == tour.first()
        || tour.is_fixed_last(customer)
        || tour.is_fixed_last(before)
        || !tour.contains(customer)
        || !tour.contains(before)
    {
        return None;
    }
    let old_before = tour.previous(customer)?;
    if old_before == before {
        return Some(0.0);
    }
    let old_after = tour.next(customer);
    let new_after = tour.next(before);

    let w = |a: usize, b: usize| problem.weight(a, b);
    let mut removed = w(old_before, customer);
    if let Some(oa) = old_after {
        removed += w(customer, oa) - w(old_before, oa);
    }

    let mut added = w(before, customer);
    if let Some(na) = new_after {
        added += w(customer, na) - w(before, na);
    }
    Some(removed - added)
}

/// Cost of inserting `visit` on the edge `from -> to`, or after the open
/// terminal `from` when `to` is `None`.
pub fn insertion_cost<P: TourProblem + ?Sized>(
    problem: &P,
    from: usize,
    to: Option<usize>,
    visit: usize,
) -> f64 {
    match to {
        Some(to) => {
            problem.weight(from, visit) + problem.weight(visit, to) - problem.weight(from, to)
        }
        None => problem.weight(from, visit),
    }
}

/// The cheapest place to insert one of `candidates` into `tour`.
///
/// Returns `(visit, after, cost)`; candidates already in the tour are
/// skipped. Open tours also consider appending after their terminal.
pub fn cheapest_insertion<P: TourProblem + ?Sized>(
    problem: &P,
    tour: &Tour,
    candidates: &[usize],
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    let open_tail = tour.last().is_none().then(|| tour.tail());

    for &visit in candidates {
        if tour.contains(visit) {
            continue;
        }
        for (from, to) in tour.pairs() {
            let cost = insertion_cost(problem, from, Some(to), visit);
            if best.is_none_or(|b| cost < b.2) {
                best = Some((visit, from, cost));
            }
        }
        if let Some(tail) = open_tail {
            let cost = insertion_cost(problem, tail, None, visit);
            if best.is_none_or(|b| cost < b.2) {
                best = Some((visit, tail, cost));
            }
        }
    }
    best
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal problem used by operator tests across the crate.
    pub(crate) struct MatrixProblem {
        pub(crate) first: usize,
        pub(crate) last: Option<usize>,
        pub(crate) weights: WeightMatrix,
    }

    impl TourProblem for MatrixProblem {
        fn first(&self) -> usize {
            self.first
        }
        fn last(&self) -> Option<usize> {
            self.last
        }
        fn count(&self) -> usize {
            self.weights.size()
        }
        fn weight(&self, from: usize, to: usize) -> f64 {
            self.weights.get(from, to)
        }
    }

    /// Points on a line: weight is the distance between indices.
    pub(crate) fn line(n: usize, last: Option<usize>) -> MatrixProblem {
        MatrixProblem {
            first: 0,
            last,
            weights: WeightMatrix::from_fn(n, |i, j| (i as f64 - j as f64).abs()),
        }
    }

    #[test]
    fn test_tour_weight_topologies() {
        let p = line(4, Some(0));
        let closed = Tour::closed([0, 1, 2, 3]).unwrap();
        assert_eq!(tour_weight(&p, &closed), 6.0);
        let open = Tour::open([0, 1, 2, 3]).unwrap();
        assert_eq!(tour_weight(&p, &open), 3.0);
    }

    #[test]
    fn test_shift_delta_matches_recalculation() {
        let p = line(6, Some(0));
        let tour = Tour::closed([0, 3, 1, 2, 5, 4]).unwrap();
        let before = tour_weight(&p, &tour);
        for customer in 1..6 {
            for target in 0..6 {
                let Some(delta) = shift_delta(&p, &tour, customer, target) else {
                    continue;
                };
                let mut moved = tour.clone();
                moved.shift_after(customer, target).unwrap();
                let after = tour_weight(&p, &moved);
                assert!(
                    (before - after - delta).abs() < 1e-9,
                    "shift {customer} after {target}: delta {delta}, actual {}",
                    before - after
                );
            }
        }
    }

    #[test]
    fn test_shift_delta_open_terminal() {
        let p = line(5, None);
        let tour = Tour::open([0, 4, 1, 2, 3]).unwrap();
        let delta = shift_delta(&p, &tour, 4, 3).unwrap();
        // 0-4-1-2-3 = 4+3+1+1 = 9, 0-1-2-3-4 = 4
        assert!((delta - 5.0).abs() < 1e-9);
        assert!(shift_delta(&p, &tour, 0, 3).is_none());
    }

    #[test]
    fn test_cheapest_insertion_picks_gap() {
        let p = line(5, Some(0));
        let tour = Tour::closed([0, 1, 4]).unwrap();
        let (visit, after, cost) = cheapest_insertion(&p, &tour, &[2, 3]).unwrap();
        assert!(visit == 2 || visit == 3);
        assert_eq!(after, 1);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_cheapest_insertion_open_tail() {
        let p = line(4, None);
        let tour = Tour::open([0, 1]).unwrap();
        let (visit, after, cost) = cheapest_insertion(&p, &tour, &[2]).unwrap();
        assert_eq!((visit, after), (2, 1));
        assert_eq!(cost, 1.0);
    }

    #[test]
    fn test_validate_terminals() {
        assert!(validate_terminals(0, Some(3), 4).is_ok());
        assert_eq!(
            validate_terminals(0, Some(4), 4),
            Err(Error::VisitOutOfRange { visit: 4, count: 4 })
        );
    }
}
