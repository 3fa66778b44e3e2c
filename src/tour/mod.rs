//! Mutable tour over integer visit ids.
//!
//! A [`Tour`] is an ordered, duplicate-free sequence of visits with a fixed
//! `first` visit and one of three topologies:
//!
//! - **open**: `last` is unset, any visit may end the tour;
//! - **closed**: `last == first`, the tour is a cycle;
//! - **fixed**: `last` is another visit that always terminates the tour.
//!
//! The sequence is stored as successor and predecessor arenas indexed
//! directly by visit id, so relocating a single visit is O(1) and reversing
//! a sub-path is O(k) in the length of that sub-path.
//!
//! # Examples
//!
//! ```
//! use u_tour::tour::Tour;
//!
//! let mut tour = Tour::closed([0, 3, 1, 2]).unwrap();
//! let shift = tour.shift_after(3, 2).unwrap();
//! assert_eq!(shift.old_before, 0);
//! assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
//! assert_eq!(tour.to_string(), "0->1->2->3->0");
//! ```

mod iter;

pub use iter::{Triples, Visits};

use crate::error::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slot marker for a visit that is not part of the tour.
const ABSENT: usize = usize::MAX;
/// Successor of a terminal visit / predecessor of `first` in non-closed tours.
const END: usize = usize::MAX - 1;

/// Outcome of [`Tour::shift_after`]: the neighbourhood of the moved visit
/// before and after the relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// Predecessor of the visit before the move.
    pub old_before: usize,
    /// Successor of the visit before the move (`None` if it was terminal).
    pub old_after: Option<usize>,
    /// Successor of the visit after the move (`None` if it is now terminal).
    pub new_after: Option<usize>,
}

/// An ordered, duplicate-free sequence of visits.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    first: usize,
    last: Option<usize>,
    next: Vec<usize>,
    prev: Vec<usize>,
    count: usize,
}

impl Tour {
    /// Builds a tour from a visit sequence.
    ///
    /// The first element of `visits` becomes `first`. `last` selects the
    /// topology: `None` for open, `Some(first)` for closed, any other visit
    /// for fixed, in which case it must be the final element of `visits`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTour`], [`Error::DuplicateVisit`] or
    /// [`Error::LastNotTerminal`] when the sequence cannot form a tour.
    pub fn new<I>(visits: I, last: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let visits: Vec<usize> = visits.into_iter().collect();
        let first = *visits.first().ok_or(Error::EmptyTour)?;

        if let Some(l) = last {
            if l != first && (visits.len() == 1 || visits.last() != Some(&l)) {
                return Err(Error::LastNotTerminal(l));
            }
        }

        let mut tour = Self::from_terminals(first, last);
        let interior_end = match last {
            Some(l) if l != first => visits.len() - 1,
            _ => visits.len(),
        };
        let mut after = first;
        for &visit in &visits[1..interior_end] {
            if tour.contains(visit) {
                return Err(Error::DuplicateVisit(visit));
            }
            tour.insert_after(after, visit);
            after = visit;
        }
        Ok(tour)
    }

    /// Builds an open tour (no fixed terminal).
    pub fn open<I: IntoIterator<Item = usize>>(visits: I) -> Result<Self> {
        Self::new(visits, None)
    }

    /// Builds a closed tour (a cycle back to the first visit).
    pub fn closed<I: IntoIterator<Item = usize>>(visits: I) -> Result<Self> {
        let visits: Vec<usize> = visits.into_iter().collect();
        let first = *visits.first().ok_or(Error::EmptyTour)?;
        Self::new(visits, Some(first))
    }

    /// Builds the smallest tour with the given terminals: `[first]` for open
    /// and closed tours, `[first, last]` for fixed ones.
    pub fn from_terminals(first: usize, last: Option<usize>) -> Self {
        let mut tour = Self {
            first,
            last,
            next: Vec::new(),
            prev: Vec::new(),
            count: 1,
        };
        tour.reserve_slot(first);
        match last {
            Some(l) if l == first => {
                tour.next[first] = first;
                tour.prev[first] = first;
            }
            Some(l) => {
                tour.reserve_slot(l);
                tour.next[first] = l;
                tour.prev[first] = END;
                tour.next[l] = END;
                tour.prev[l] = first;
                tour.count = 2;
            }
            None => {
                tour.next[first] = END;
                tour.prev[first] = END;
            }
        }
        tour
    }

    /// The first visit.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The designated last visit: `None` for open tours, `Some(first)` for
    /// closed tours, the fixed terminal otherwise.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Number of visits in the tour.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if the tour is a cycle.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Returns `true` if `visit` is the fixed terminal of a fixed tour.
    pub fn is_fixed_last(&self, visit: usize) -> bool {
        self.last == Some(visit) && visit != self.first
    }

    /// Returns `true` if `visit` is part of the tour.
    pub fn contains(&self, visit: usize) -> bool {
        self.next.get(visit).is_some_and(|&n| n != ABSENT)
    }

    /// Successor of `visit`, or `None` if `visit` ends an open/fixed tour or
    /// is not part of the tour.
    pub fn next(&self, visit: usize) -> Option<usize> {
        match self.next.get(visit) {
            Some(&n) if n != ABSENT && n != END => Some(n),
            _ => None,
        }
    }

    /// Predecessor of `visit`, or `None` if `visit` starts an open/fixed tour
    /// or is not part of the tour.
    pub fn previous(&self, visit: usize) -> Option<usize> {
        match self.prev.get(visit) {
            Some(&p) if p != ABSENT && p != END => Some(p),
            _ => None,
        }
    }

    /// The visit currently ending the tour.
    ///
    /// O(1) for closed and fixed tours, O(n) for open ones.
    pub fn tail(&self) -> usize {
        match self.last {
            Some(l) if l == self.first => self.prev[self.first],
            Some(l) => l,
            None => self.iter().last().unwrap_or(self.first),
        }
    }

    /// Inserts `visit` directly after `after`.
    ///
    /// # Panics
    ///
    /// Panics if `after` is not in the tour, if `visit` already is, or if
    /// `after` is the fixed terminal.
    pub fn insert_after(&mut self, after: usize, visit: usize) {
        assert!(self.contains(after), "visit {after} is not in the tour");
        assert!(!self.contains(visit), "visit {visit} is already in the tour");
        assert!(
            !self.is_fixed_last(after),
            "cannot insert after the fixed last visit {after}"
        );

        self.reserve_slot(visit);
        let old_next = self.next[after];
        self.next[after] = visit;
        self.prev[visit] = after;
        self.next[visit] = old_next;
        if old_next != END {
            self.prev[old_next] = visit;
        }
        self.count += 1;
    }

    /// Removes `visit` from the tour.
    ///
    /// Returns `false`, leaving the tour unchanged, if `visit` is absent, is
    /// the first visit or is the fixed terminal.
    pub fn remove(&mut self, visit: usize) -> bool {
        if !self.contains(visit) || visit == self.first || self.is_fixed_last(visit) {
            return false;
        }
        let before = self.prev[visit];
        let after = self.next[visit];
        self.next[before] = after;
        if after != END {
            self.prev[after] = before;
        }
        self.next[visit] = ABSENT;
        self.prev[visit] = ABSENT;
        self.count -= 1;
        true
    }

    /// Redirects the successor of `from` to `to` and records `from` as the
    /// predecessor of `to`.
    ///
    /// This is the low-level primitive beneath sub-path reversal: a single
    /// call may leave the tour inconsistent until the remaining edges of the
    /// reversal are rewritten. Prefer [`reverse`](Self::reverse).
    pub fn replace_edge_from(&mut self, from: usize, to: usize) {
        debug_assert!(self.contains(from) && self.contains(to));
        self.next[from] = to;
        self.prev[to] = from;
    }

    /// Reverses the sub-path starting right after `before` and ending at
    /// `end` (inclusive).
    ///
    /// The edges `before -> x` and `end -> y` become `before -> end` and
    /// `x -> y`. When `end` terminates an open tour, `x` becomes the new
    /// terminal.
    ///
    /// # Panics
    ///
    /// Panics if the sub-path is empty, contains `first` or the fixed
    /// terminal, or if `end` is not reachable from `before`.
    pub fn reverse(&mut self, before: usize, end: usize) {
        let mut segment = Vec::new();
        let mut current = self.next(before);
        loop {
            let visit = current.expect("reversal end must follow `before` in the tour");
            assert!(
                visit != self.first && !self.is_fixed_last(visit),
                "cannot reverse across the tour terminals"
            );
            segment.push(visit);
            if visit == end {
                break;
            }
            current = self.next(visit);
        }

        let after = self.next[end];
        self.replace_edge_from(before, end);
        for k in (1..segment.len()).rev() {
            self.replace_edge_from(segment[k], segment[k - 1]);
        }
        if after == END {
            self.next[segment[0]] = END;
        } else {
            self.replace_edge_from(segment[0], after);
        }
    }

    /// Relocates `customer` directly after `before`, reporting the old and
    /// new neighbourhood.
    ///
    /// Returns `None`, leaving the tour unchanged, if the move would break
    /// the tour invariants: `customer` is `first` or the fixed terminal,
    /// either visit is absent, `customer == before`, or `before` is the fixed
    /// terminal. Shifting a visit after its current predecessor succeeds as a
    /// no-op.
    pub fn shift_after(&mut self, customer: usize, before: usize) -> Option<Shift> {
        if customer == before
            || customer == self.first
            || self.is_fixed_last(customer)
            || self.is_fixed_last(before)
            || !self.contains(customer)
            || !self.contains(before)
        {
            return None;
        }

        let old_before = self.prev[customer];
        let old_after = self.next[customer];
        if old_before == before {
            let after = (old_after != END).then_some(old_after);
            return Some(Shift {
                old_before,
                old_after: after,
                new_after: after,
            });
        }

        self.next[old_before] = old_after;
        if old_after != END {
            self.prev[old_after] = old_before;
        }

        let new_after = self.next[before];
        self.next[before] = customer;
        self.prev[customer] = before;
        self.next[customer] = new_after;
        if new_after != END {
            self.prev[new_after] = customer;
        }

        Some(Shift {
            old_before,
            old_after: (old_after != END).then_some(old_after),
            new_after: (new_after != END).then_some(new_after),
        })
    }

    /// Rewrites the id `old` into `new` at the same position.
    ///
    /// Used by directed operators to change the turn of a visit in place.
    /// `first`/`last` follow the rewrite.
    ///
    /// # Panics
    ///
    /// Panics if `old` is absent or `new` is already present.
    pub fn replace(&mut self, old: usize, new: usize) {
        if old == new {
            return;
        }
        assert!(self.contains(old), "visit {old} is not in the tour");
        assert!(!self.contains(new), "visit {new} is already in the tour");

        self.reserve_slot(new);
        let before = self.prev[old];
        let after = self.next[old];

        self.next[new] = if after == old { new } else { after };
        self.prev[new] = if before == old { new } else { before };
        if before != END && before != old {
            self.next[before] = new;
        }
        if after != END && after != old {
            self.prev[after] = new;
        }
        self.next[old] = ABSENT;
        self.prev[old] = ABSENT;

        if self.first == old {
            self.first = new;
        }
        if self.last == Some(old) {
            self.last = Some(new);
        }
    }

    /// Iterates the visits starting at `first`.
    pub fn iter(&self) -> Visits<'_> {
        Visits::new(self, self.first)
    }

    /// Iterates the visits starting at `visit`.
    ///
    /// Closed tours wrap around and stop before `visit`; open and fixed tours
    /// stop at their terminal.
    pub fn iter_from(&self, visit: usize) -> Visits<'_> {
        Visits::new(self, visit)
    }

    /// Iterates the edges `(from, to)` of the tour, including the closing
    /// edge of a closed tour.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter().filter_map(move |v| self.next(v).map(|n| (v, n)))
    }

    /// Iterates `(previous, visit, next)` triples.
    pub fn triples(&self) -> Triples<'_> {
        Triples::new(self)
    }

    /// Collects the visits in tour order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    fn reserve_slot(&mut self, visit: usize) {
        if visit >= self.next.len() {
            self.next.resize(visit + 1, ABSENT);
            self.prev.resize(visit + 1, ABSENT);
        }
    }
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first
            && self.last == other.last
            && self.count == other.count
            && self.iter().eq(other.iter())
    }
}

impl Eq for Tour {}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for visit in self.iter() {
            write!(f, "{separator}{visit}")?;
            separator = "->";
        }
        if self.is_closed() {
            write!(f, "->{}", self.first)?;
        }
        Ok(())
    }
}
