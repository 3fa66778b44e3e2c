//! Repeat a solver and keep the best result.

use super::Solver;
use crate::objective::{Candidate, Objective};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Early-accept predicate: returning `true` ends the repetition.
pub type AcceptFn<P, F> = Box<dyn Fn(&P, &Candidate<F>) -> bool + Send + Sync>;

/// Runs the inner solver `n` times and returns the best candidate.
///
/// In parallel mode the runs fan out over rayon. Every run gets a private
/// [`StdRng`] seeded from the caller's generator, so results are
/// reproducible for a fixed seed up to the order in which runs finish.
/// Finished runs are merged into one mutex-guarded best slot; the accept
/// predicate is evaluated under the same lock and raises a shared stop flag
/// that keeps pending runs from starting.
pub struct Iterative<P, O: Objective<P>, S> {
    solver: S,
    n: usize,
    parallel: bool,
    accept: Option<AcceptFn<P, O::Fitness>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P, O: Objective<P>, S: Solver<P, O>> Iterative<P, O, S> {
    /// Repeats `solver` `n` times (at least once), sequentially.
    pub fn new(solver: S, n: usize) -> Self {
        Self {
            solver,
            n: n.max(1),
            parallel: false,
            accept: None,
            cancel: None,
        }
    }

    /// Enables or disables parallel repetition.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops repeating as soon as a result satisfies `accept`.
    pub fn with_accept<F>(mut self, accept: F) -> Self
    where
        F: Fn(&P, &Candidate<O::Fitness>) -> bool + Send + Sync + 'static,
    {
        self.accept = Some(Box::new(accept));
        self
    }

    /// Stops starting new runs once `cancel` is raised.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn accepts(&self, problem: &P, candidate: &Candidate<O::Fitness>) -> bool {
        self.accept
            .as_ref()
            .is_some_and(|accept| accept(problem, candidate))
    }

    fn solve_sequential<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let mut best = self.solver.solve(problem, objective, rng);
        log::debug!("{}: run 1/{} -> {:?}", self.solver.name(), self.n, best.fitness);

        for run in 1..self.n {
            if self.accepts(problem, &best) || self.cancelled() {
                break;
            }
            let candidate = self.solver.solve(problem, objective, rng);
            log::debug!(
                "{}: run {}/{} -> {:?}",
                self.solver.name(),
                run + 1,
                self.n,
                candidate.fitness
            );
            if candidate.is_better(problem, objective, &best) {
                best = candidate;
            }
        }
        best
    }
}

impl<P, O, S> Iterative<P, O, S>
where
    P: Sync,
    O: Objective<P>,
    S: Solver<P, O>,
{
    fn solve_parallel<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let seeds: Vec<u64> = (0..self.n).map(|_| rng.random()).collect();
        let best: Mutex<Option<Candidate<O::Fitness>>> = Mutex::new(None);
        let stop = AtomicBool::new(false);

        seeds.par_iter().for_each(|&seed| {
            if stop.load(Ordering::Relaxed) || self.cancelled() {
                return;
            }
            let mut worker_rng = StdRng::seed_from_u64(seed);
            let candidate = self.solver.solve(problem, objective, &mut worker_rng);
            log::debug!("{}: worker -> {:?}", self.solver.name(), candidate.fitness);

            let mut slot = best.lock().unwrap_or_else(|e| e.into_inner());
            let accepted = self.accepts(problem, &candidate);
            let improves = slot
                .as_ref()
                .is_none_or(|current| candidate.is_better(problem, objective, current));
            if improves {
                *slot = Some(candidate);
            }
            if accepted {
                stop.store(true, Ordering::Relaxed);
            }
        });

        let best = best.into_inner().unwrap_or_else(|e| e.into_inner());
        match best {
            Some(best) => best,
            // Every run was skipped by cancellation.
            None => self.solver.solve(problem, objective, rng),
        }
    }
}

impl<P, O, S> Solver<P, O> for Iterative<P, O, S>
where
    P: Sync,
    O: Objective<P>,
    S: Solver<P, O>,
{
    fn name(&self) -> String {
        format!("{}x{}", self.solver.name(), self.n)
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        if self.parallel && self.n > 1 {
            self.solve_parallel(problem, objective, rng)
        } else {
            self.solve_sequential(problem, objective, rng)
        }
    }
}
