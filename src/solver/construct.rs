//! Constructive solvers.

use super::Solver;
use crate::objective::{Candidate, Objective};
use crate::operator::unplaced_visits;
use crate::problem::{cheapest_insertion, insertion_cost, tour_weight, TourProblem};
use crate::tour::Tour;
use rand::seq::SliceRandom;
use rand::Rng;

/// Places every visit in uniformly random order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSolver;

impl<P, O> Solver<P, O> for RandomSolver
where
    P: TourProblem,
    O: Objective<P>,
{
    fn name(&self) -> String {
        "random".into()
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        let mut tour = problem.empty_tour();
        let mut visits = unplaced_visits(problem, &tour);
        visits.shuffle(rng);

        let mut after = tour.first();
        for visit in visits {
            tour.insert_after(after, visit);
            after = visit;
        }
        Candidate::evaluate(problem, objective, tour)
    }
}

/// Greedy cheapest insertion.
///
/// Starting from the terminals, repeatedly inserts the unplaced visit with
/// the smallest insertion cost `w[u,v] + w[v,w] - w[u,w]`. Construction
/// stops when every visit is placed, when the cheapest insertion costs more
/// than `max_cost`, or when it would exceed the problem's weight budget.
#[derive(Debug, Clone, Copy)]
pub struct CheapestInsertionSolver {
    max_cost: f64,
    random_start: bool,
}

impl Default for CheapestInsertionSolver {
    fn default() -> Self {
        Self {
            max_cost: f64::INFINITY,
            random_start: false,
        }
    }
}

impl CheapestInsertionSolver {
    /// Unbounded, deterministic construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops inserting once the cheapest insertion costs more than `cost`.
    pub fn with_max_cost(mut self, cost: f64) -> Self {
        self.max_cost = cost;
        self
    }

    /// Seeds the tour with one random visit before the greedy phase, so
    /// repeated runs explore different constructions.
    pub fn with_random_start(mut self, random_start: bool) -> Self {
        self.random_start = random_start;
        self
    }

    /// Builds the tour without scoring it.
    pub fn build<P: TourProblem + ?Sized, R: Rng>(&self, problem: &P, rng: &mut R) -> Tour {
        let mut tour = problem.empty_tour();
        let mut unplaced = unplaced_visits(problem, &tour);
        let budget = problem.weight_budget().unwrap_or(f64::INFINITY);
        let mut weight = tour_weight(problem, &tour);

        if self.random_start && !unplaced.is_empty() {
            let visit = unplaced.swap_remove(rng.random_range(0..unplaced.len()));
            let first = tour.first();
            let cost = insertion_cost(problem, first, tour.next(first), visit);
            if cost <= self.max_cost && weight + cost <= budget {
                tour.insert_after(first, visit);
                weight += cost;
            } else {
                unplaced.push(visit);
            }
        }

        while let Some((visit, after, cost)) = cheapest_insertion(problem, &tour, &unplaced) {
            if cost > self.max_cost || weight + cost > budget {
                break;
            }
            tour.insert_after(after, visit);
            weight += cost;
            unplaced.retain(|&v| v != visit);
        }
        tour
    }
}

impl<P, O> Solver<P, O> for CheapestInsertionSolver
where
    P: TourProblem,
    O: Objective<P>,
{
    fn name(&self) -> String {
        "cheapest-insertion".into()
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        let tour = self.build(problem, rng);
        Candidate::evaluate(problem, objective, tour)
    }
}
