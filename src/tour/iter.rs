//! Iterators over the visits of a [`Tour`].

use super::Tour;

/// Iterator over the visits of a tour, in tour order.
///
/// Created by [`Tour::iter`] and [`Tour::iter_from`]. For closed tours the
/// iteration stops before wrapping back to its starting visit.
#[derive(Debug, Clone)]
pub struct Visits<'a> {
    tour: &'a Tour,
    start: usize,
    current: Option<usize>,
}

impl<'a> Visits<'a> {
    pub(super) fn new(tour: &'a Tour, start: usize) -> Self {
        let current = tour.contains(start).then_some(start);
        Self {
            tour,
            start,
            current,
        }
    }
}

impl Iterator for Visits<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let visit = self.current?;
        self.current = self.tour.next(visit).filter(|&n| n != self.start);
        Some(visit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current {
            Some(_) => (1, Some(self.tour.count())),
            None => (0, Some(0)),
        }
    }
}

/// Iterator over `(previous, visit, next)` triples of a tour.
///
/// Only visits with both a predecessor and a successor are yielded, so the
/// endpoints of an open or fixed tour are skipped.
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    visits: Visits<'a>,
}

impl<'a> Triples<'a> {
    pub(super) fn new(tour: &'a Tour) -> Self {
        Self {
            visits: tour.iter(),
        }
    }
}

impl Iterator for Triples<'_> {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let tour = self.visits.tour;
        for visit in self.visits.by_ref() {
            if let (Some(prev), Some(next)) = (tour.previous(visit), tour.next(visit)) {
                if prev != visit {
                    return Some((prev, visit, next));
                }
            }
        }
        None
    }
}
