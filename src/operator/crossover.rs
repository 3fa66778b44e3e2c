//! Permutation crossovers on tours.
//!
//! Both operators recombine the *interior* of two parent tours, i.e. the
//! visits between the terminals; `first` and a fixed `last` stay in place.
//!
//! - [`OrderCrossover`] (OX): Davis (1985), preserves relative order.
//! - [`PartiallyMappedCrossover`] (PMX): Goldberg & Lingle (1985), preserves
//!   absolute positions.
//!
//! When the parents do not share the same interior visits the first parent is
//! returned unchanged.

use super::one_shift::movable_visits;
use super::Crossover;
use crate::objective::{Candidate, Objective};
use crate::tour::Tour;
use rand::Rng;

/// Order crossover (OX).
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

/// Partially mapped crossover (PMX).
#[derive(Debug, Clone, Copy, Default)]
pub struct PartiallyMappedCrossover;

impl<P, O: Objective<P>> Crossover<P, O> for OrderCrossover {
    fn name(&self) -> String {
        "OX".into()
    }

    fn crossover<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        first: &Tour,
        second: &Tour,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let tour = recombine(first, second, rng, ox_build_child);
        Candidate::evaluate(problem, objective, tour)
    }
}

impl<P, O: Objective<P>> Crossover<P, O> for PartiallyMappedCrossover {
    fn name(&self) -> String {
        "PMX".into()
    }

    fn crossover<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        first: &Tour,
        second: &Tour,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let tour = recombine(first, second, rng, pmx_build_child);
        Candidate::evaluate(problem, objective, tour)
    }
}

/// Maps both interiors onto indices `0..m` (positions in `first`), builds a
/// child permutation with `build` and turns it back into a tour.
fn recombine<R, F>(first: &Tour, second: &Tour, rng: &mut R, build: F) -> Tour
where
    R: Rng,
    F: Fn(&[usize], &[usize], usize, usize) -> Vec<usize>,
{
    let template_ids = movable_visits(first);
    let donor_ids = movable_visits(second);
    let m = template_ids.len();
    if m < 2 || donor_ids.len() != m {
        return first.clone();
    }

    let max_id = template_ids.iter().copied().max().unwrap_or(0);
    let mut index_of = vec![usize::MAX; max_id + 1];
    for (i, &id) in template_ids.iter().enumerate() {
        index_of[id] = i;
    }
    let mut donor = Vec::with_capacity(m);
    for &id in &donor_ids {
        match index_of.get(id) {
            Some(&i) if i != usize::MAX => donor.push(i),
            _ => return first.clone(),
        }
    }
    let template: Vec<usize> = (0..m).collect();

    let (start, end) = random_segment(m, rng);
    let child = build(&template, &donor, start, end);

    let mut tour = Tour::from_terminals(first.first(), first.last());
    let mut after = first.first();
    for i in child {
        let id = template_ids[i];
        tour.insert_after(after, id);
        after = id;
    }
    tour
}

/// One OX child: copy `[start, end]` from `template`, fill the remaining
/// positions from `donor` in order, starting after the segment.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }
    child
}

/// One PMX child: copy `[start, end]` from `template`, place the donor's
/// segment values through the mapping chain, fill the rest from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];
    let mut donor_pos = vec![0; n];
    for (i, &v) in donor.iter().enumerate() {
        donor_pos[v] = i;
    }

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    for i in start..=end {
        let donor_val = donor[i];
        if placed[donor_val] {
            continue;
        }
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < start || target > end {
                child[target] = donor_val;
                placed[donor_val] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == usize::MAX {
            child[i] = donor[i];
        }
    }
    child
}

/// Random segment `[start, end]` within `0..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
