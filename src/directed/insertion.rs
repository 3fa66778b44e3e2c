//! Cheapest insertion for directed tours.

use super::helper::{charged_penalty, edge_weight, legal_turns, optimize_turns, placement_cost};
use super::id::{DirectedId, Turn};
use super::problem::DirectedProblem;
use crate::objective::{Candidate, Objective};
use crate::solver::Solver;
use crate::tour::Tour;
use rand::Rng;

/// Greedy cheapest insertion choosing the turn of every inserted visit.
///
/// Each step inserts the unplaced visit, position and turn with the smallest
/// increase of edge weight plus turn penalty. Insertion stops once all
/// visits are placed or the cheapest insertion costs more than `max_cost`;
/// the turns are then re-optimized until no visit can do better.
#[derive(Debug, Clone, Copy)]
pub struct DirectedCheapestInsertion {
    max_cost: f64,
}

impl Default for DirectedCheapestInsertion {
    fn default() -> Self {
        Self {
            max_cost: f64::INFINITY,
        }
    }
}

/// One insertion option: raw directed id to insert and the visit to insert
/// it after.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    visit: usize,
    after: usize,
    cost: f64,
}

impl DirectedCheapestInsertion {
    /// Unbounded construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops inserting once the cheapest insertion costs more than `cost`.
    pub fn with_max_cost(mut self, cost: f64) -> Self {
        self.max_cost = cost;
        self
    }

    /// Builds the tour without scoring it.
    pub fn build<P: DirectedProblem + ?Sized>(&self, problem: &P) -> Tour {
        let mut tour = problem.empty_tour();
        let mut placed = vec![false; problem.count()];
        for visit in tour.iter() {
            placed[DirectedId::from_raw(visit).id()] = true;
        }

        while let Some(best) = cheapest(problem, &tour, &placed) {
            if best.cost > self.max_cost {
                break;
            }
            tour.insert_after(best.after, best.visit);
            placed[DirectedId::from_raw(best.visit).id()] = true;
        }

        while optimize_turns(problem, &mut tour) > 0.0 {}
        tour
    }
}

fn cheapest<P: DirectedProblem + ?Sized>(problem: &P, tour: &Tour, placed: &[bool]) -> Option<Insertion> {
    let open_tail = tour.last().is_none().then(|| tour.tail());
    let mut best: Option<Insertion> = None;
    let mut consider = |visit: usize, after: usize, cost: f64| {
        if best.is_none_or(|b| cost < b.cost) {
            best = Some(Insertion { visit, after, cost });
        }
    };

    for id in (0..placed.len()).filter(|&id| !placed[id]) {
        for (from, to) in tour.pairs() {
            let mut removed = edge_weight(problem, from, to);
            if from == to {
                // A closed single-visit tour: its only visit becomes interior.
                removed -= problem.turn_penalty(DirectedId::from_raw(from).turn());
            }
            for &turn in &Turn::ALL {
                let cost = placement_cost(problem, Some(from), id, turn, Some(to)) - removed;
                consider(DirectedId::new(id, turn).raw(), from, cost);
            }
        }
        if let Some(tail) = open_tail {
            // The old tail becomes interior and starts paying its turn.
            let mut charged = -charged_penalty(problem, tour, tail);
            if tour.previous(tail).is_some() {
                charged += problem.turn_penalty(DirectedId::from_raw(tail).turn());
            }
            for &turn in legal_turns(true, false) {
                let cost = placement_cost(problem, Some(tail), id, turn, None) + charged;
                consider(DirectedId::new(id, turn).raw(), tail, cost);
            }
        }
    }
    best
}

impl<P, O> Solver<P, O> for DirectedCheapestInsertion
where
    P: DirectedProblem,
    O: Objective<P>,
{
    fn name(&self) -> String {
        "directed-cheapest-insertion".into()
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, _rng: &mut R) -> Candidate<O::Fitness> {
        Candidate::evaluate(problem, objective, self.build(problem))
    }
}
