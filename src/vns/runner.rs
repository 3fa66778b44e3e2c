//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Build an initial tour with the generator, run local search to
//!    convergence; that is `best`
//! 2. Set level k = 1
//! 3. While not cancelled and the stopping condition is false:
//!    a. **Shaking**: perturb a copy of `best` at level k
//!    b. **Local search**: converge the copy
//!    c. **Move or not**: if the copy is better, it becomes `best` and
//!    k = 1; otherwise k = k + 1
//! 4. Return `best`
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use super::config::VnsConfig;
use crate::error::Result;
use crate::objective::{Candidate, Fitness, Objective};
use crate::operator::{converge, Operator, Perturber, DEFAULT_MAX_ROUNDS};
use crate::solver::Solver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Extra stopping predicate: `(iteration, level, problem, objective, best)`.
pub type StopFn<P, O, F> = Box<dyn Fn(usize, usize, &P, &O, &Candidate<F>) -> bool + Send + Sync>;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<F> {
    /// Best candidate found.
    pub best: Candidate<F>,
    /// Shaking steps executed.
    pub iterations: usize,
    /// Iteration at which `best` was found (0 for the initial tour).
    pub best_iteration: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
    /// Best fitness after each iteration, starting with the initial tour.
    pub fitness_history: Vec<f64>,
}

/// Variable Neighborhood Search over tours.
///
/// `G` builds the initial candidate, `Pt` shakes, `L` is the local search
/// applied to convergence after every shake.
///
/// # Examples
///
/// ```
/// use u_tour::operator::{RandomShift, TwoOpt};
/// use u_tour::problem::WeightMatrix;
/// use u_tour::solver::CheapestInsertionSolver;
/// use u_tour::tsp::{TspObjective, TspProblem};
/// use u_tour::vns::{VnsConfig, VnsSolver};
///
/// let weights = WeightMatrix::from_fn(6, |i, j| (i as f64 - j as f64).abs());
/// let problem = TspProblem::closed(0, weights).unwrap();
/// let vns = VnsSolver::new(
///     VnsConfig::default().with_max_iterations(100).with_seed(7),
///     CheapestInsertionSolver::new(),
///     RandomShift,
///     TwoOpt,
/// )
/// .unwrap();
/// let result = vns.run(&problem, &TspObjective);
/// assert_eq!(result.best.fitness, 10.0);
/// ```
pub struct VnsSolver<P, O: Objective<P>, G, Pt, L> {
    config: VnsConfig,
    generator: G,
    perturber: Pt,
    local_search: L,
    stop: Option<StopFn<P, O, O::Fitness>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P, O, G, Pt, L> VnsSolver<P, O, G, Pt, L>
where
    O: Objective<P>,
    G: Solver<P, O>,
    Pt: Perturber<P, O>,
    L: Operator<P, O>,
{
    /// Creates a VNS.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: VnsConfig, generator: G, perturber: Pt, local_search: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            perturber,
            local_search,
            stop: None,
            cancel: None,
        })
    }

    /// Adds a stopping predicate, checked in addition to the iteration and
    /// level limits.
    pub fn with_stop<F>(mut self, stop: F) -> Self
    where
        F: Fn(usize, usize, &P, &O, &Candidate<O::Fitness>) -> bool + Send + Sync + 'static,
    {
        self.stop = Some(Box::new(stop));
        self
    }

    /// Installs a cancellation flag, checked once per iteration.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &VnsConfig {
        &self.config
    }

    /// Runs the search with a generator seeded from the configuration.
    pub fn run(&self, problem: &P, objective: &O) -> VnsResult<O::Fitness> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        self.run_with_rng(problem, objective, &mut rng)
    }

    /// Runs the search with the caller's generator.
    pub fn run_with_rng<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        rng: &mut R,
    ) -> VnsResult<O::Fitness> {
        if !self.local_search.supports(objective) {
            log::warn!(
                "{} does not support objective {}",
                self.local_search.name(),
                objective.name()
            );
        }
        if !self.perturber.supports(objective) {
            log::warn!(
                "{} does not support objective {}",
                self.perturber.name(),
                objective.name()
            );
        }

        let mut best = self.generator.solve(problem, objective, rng);
        if converge(
            &self.local_search,
            problem,
            objective,
            &mut best.tour,
            DEFAULT_MAX_ROUNDS,
            rng,
        )
        .is_some()
        {
            best.fitness = objective.calculate(problem, &best.tour);
        }
        log::debug!("VNS[{}]: initial {:?}", objective.name(), best.fitness);

        let mut fitness_history = vec![best.fitness.to_f64()];
        let mut best_iteration = 0;
        let mut iteration = 0;
        let mut level = 1;
        let mut cancelled = false;

        loop {
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                cancelled = true;
                break;
            }
            if self.should_stop(iteration, level, problem, objective, &best) {
                break;
            }
            iteration += 1;

            let mut trial = best.tour.clone();
            let shaken = self
                .perturber
                .perturb(problem, objective, &mut trial, level, rng);
            let improved = converge(
                &self.local_search,
                problem,
                objective,
                &mut trial,
                DEFAULT_MAX_ROUNDS,
                rng,
            );
            let net = match (shaken, improved) {
                (Some(a), Some(b)) => Some(objective.add(problem, a, b)),
                (a, b) => a.or(b),
            };

            let accepted = net.is_some_and(|delta| objective.is_improvement(problem, delta)) && {
                let fitness = objective.calculate(problem, &trial);
                if objective.compare(problem, fitness, best.fitness) == CmpOrdering::Less {
                    best = Candidate::new(trial, fitness);
                    true
                } else {
                    false
                }
            };

            if accepted {
                log::debug!(
                    "VNS[{}]: iteration {iteration} level {level} -> {:?}",
                    objective.name(),
                    best.fitness
                );
                best_iteration = iteration;
                level = 1;
            } else {
                level += 1;
            }
            fitness_history.push(best.fitness.to_f64());
        }

        VnsResult {
            best,
            iterations: iteration,
            best_iteration,
            cancelled,
            fitness_history,
        }
    }

    fn should_stop(
        &self,
        iteration: usize,
        level: usize,
        problem: &P,
        objective: &O,
        best: &Candidate<O::Fitness>,
    ) -> bool {
        iteration >= self.config.max_iterations
            || level > self.config.level_max
            || self
                .stop
                .as_ref()
                .is_some_and(|stop| stop(iteration, level, problem, objective, best))
    }
}

impl<P, O, G, Pt, L> Solver<P, O> for VnsSolver<P, O, G, Pt, L>
where
    O: Objective<P>,
    G: Solver<P, O>,
    Pt: Perturber<P, O>,
    L: Operator<P, O>,
{
    fn name(&self) -> String {
        format!(
            "VNS({}, {}, {})",
            self.generator.name(),
            self.perturber.name(),
            self.local_search.name()
        )
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        self.run_with_rng(problem, objective, rng).best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{OneShiftLocalSearch, RandomShift, Sequence, TwoOpt};
    use crate::problem::tests::{line, MatrixProblem};
    use crate::problem::WeightMatrix;
    use crate::solver::RandomSolver;
    use crate::tour::tests::assert_invariants;
    use crate::tsp::TspObjective;

    type LocalSearch = Sequence<TwoOpt, OneShiftLocalSearch>;
    type TspVns = VnsSolver<MatrixProblem, TspObjective, RandomSolver, RandomShift, LocalSearch>;

    fn vns(config: VnsConfig) -> TspVns {
        VnsSolver::new(
            config,
            RandomSolver,
            RandomShift,
            Sequence::new(TwoOpt, OneShiftLocalSearch),
        )
        .unwrap()
    }

    /// Ring of `n` visits: neighbours cost 1, everything else costs 10, so
    /// the ring order (either direction) is the unique optimum of weight `n`.
    fn ring(n: usize) -> MatrixProblem {
        MatrixProblem {
            first: 0,
            last: Some(0),
            weights: WeightMatrix::from_fn(n, |i, j| {
                if (i + 1) % n == j || (j + 1) % n == i {
                    1.0
                } else {
                    10.0
                }
            }),
        }
    }

    #[test]
    fn test_vns_reaches_unique_optimum() {
        let p = ring(12);
        let config = VnsConfig::default()
            .with_max_iterations(2000)
            .with_level_max(40)
            .with_seed(42);
        let result = vns(config).run(&p, &TspObjective);
        assert_eq!(result.best.fitness, 12.0);
        assert_invariants(&result.best.tour);
        assert_eq!(result.best.fitness, TspObjective.calculate(&p, &result.best.tour));
    }

    #[test]
    fn test_vns_history_non_increasing() {
        let p = line(15, Some(0));
        let config = VnsConfig::default().with_max_iterations(100).with_seed(3);
        let result = vns(config).run(&p, &TspObjective);
        assert_eq!(result.fitness_history.len(), result.iterations + 1);
        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0] + 1e-10);
        }
        assert!(result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_vns_stops_at_level_max() {
        // A 2-visit tour offers nothing to shake, so every iteration fails
        // and the level limit ends the run.
        let p = line(2, Some(0));
        let config = VnsConfig::default().with_level_max(4).with_seed(1);
        let result = vns(config).run(&p, &TspObjective);
        assert_eq!(result.iterations, 4);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_vns_custom_stop() {
        let p = line(10, Some(0));
        let solver = vns(VnsConfig::default().with_seed(5))
            .with_stop(|iteration, _, _, _, _| iteration >= 7);
        let result = solver.run(&p, &TspObjective);
        assert_eq!(result.iterations, 7);
    }

    #[test]
    fn test_vns_stop_on_target_fitness() {
        let p = line(10, Some(0));
        let solver = vns(VnsConfig::default().with_level_max(30).with_seed(5))
            .with_stop(|_, _, problem, objective, best| {
                objective.is_zero(problem, best.fitness - 18.0)
            });
        let result = solver.run(&p, &TspObjective);
        assert_eq!(result.best.fitness, 18.0);
    }

    #[test]
    fn test_vns_cancelled_before_start() {
        let p = line(10, Some(0));
        let cancel = Arc::new(AtomicBool::new(true));
        let result = vns(VnsConfig::default().with_seed(5))
            .with_cancel(cancel)
            .run(&p, &TspObjective);
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best.tour.count(), 10);
    }

    #[test]
    fn test_vns_seed_reproducible() {
        let p = line(12, None);
        let config = VnsConfig::default().with_max_iterations(50).with_seed(9);
        let a = vns(config.clone()).run(&p, &TspObjective);
        let b = vns(config).run(&p, &TspObjective);
        assert_eq!(a.best.tour, b.best.tour);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_vns_as_generator_of_vns() {
        let p = line(9, Some(0));
        let inner = vns(VnsConfig::default().with_max_iterations(20).with_seed(1));
        let outer = VnsSolver::new(
            VnsConfig::default().with_max_iterations(20).with_seed(2),
            inner,
            RandomShift,
            TwoOpt,
        )
        .unwrap();
        let result = outer.run(&p, &TspObjective);
        assert_eq!(result.best.fitness, 16.0);
    }
}
