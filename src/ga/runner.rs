//! GA evolutionary loop execution.
//!
//! [`GaSolver`] orchestrates the complete evolutionary process:
//! initialization → selection → crossover → mutation → replacement → repeat.

use super::config::GaConfig;
use super::selection::Tournament;
use crate::error::Result;
use crate::objective::{Candidate, Fitness, Objective};
use crate::operator::{Crossover, Operator};
use crate::solver::Solver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Callback receiving every new best candidate, synchronously.
pub type ReporterFn<F> = Box<dyn Fn(&Candidate<F>) + Send + Sync>;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<F> {
    /// The best candidate found during the entire run.
    pub best: Candidate<F>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness at the end of each generation, starting with the
    /// initial population.
    pub fitness_history: Vec<f64>,
}

/// Genetic algorithm over tours.
///
/// `G` builds the individuals of the initial population, `C` recombines two
/// parents into one child and `M` is the mutation, any [`Operator`]
/// (typically a local search).
///
/// # Examples
///
/// ```
/// use u_tour::ga::{GaConfig, GaSolver};
/// use u_tour::operator::{OrderCrossover, TwoOpt};
/// use u_tour::problem::WeightMatrix;
/// use u_tour::solver::RandomSolver;
/// use u_tour::tsp::{TspObjective, TspProblem};
///
/// let weights = WeightMatrix::from_fn(8, |i, j| (i as f64 - j as f64).abs());
/// let problem = TspProblem::closed(0, weights).unwrap();
/// let config = GaConfig::fast().with_seed(3).with_parallel(false);
/// let ga = GaSolver::new(config, RandomSolver, OrderCrossover, TwoOpt).unwrap();
/// let result = ga.run(&problem, &TspObjective);
/// assert!(result.best.fitness >= 14.0);
/// ```
pub struct GaSolver<P, O: Objective<P>, G, C, M> {
    config: GaConfig,
    tournament: Tournament,
    generator: G,
    crossover: C,
    mutation: M,
    reporter: Option<ReporterFn<O::Fitness>>,
    cancel: Option<Arc<AtomicBool>>,
    _problem: std::marker::PhantomData<fn(&P)>,
}

impl<P, O, G, C, M> GaSolver<P, O, G, C, M>
where
    P: Sync,
    O: Objective<P>,
    G: Solver<P, O>,
    C: Crossover<P, O>,
    M: Operator<P, O>,
{
    /// Creates a GA.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: GaConfig, generator: G, crossover: C, mutation: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tournament: Tournament::new(config.tournament_size, config.tournament_probability),
            config,
            generator,
            crossover,
            mutation,
            reporter: None,
            cancel: None,
            _problem: std::marker::PhantomData,
        })
    }

    /// Reports every new best candidate to `reporter`.
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: Fn(&Candidate<O::Fitness>) + Send + Sync + 'static,
    {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Installs a cancellation flag, checked once per generation.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA with a generator seeded from the configuration.
    pub fn run(&self, problem: &P, objective: &O) -> GaResult<O::Fitness> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        self.run_with_rng(problem, objective, &mut rng)
    }

    /// Runs the GA with the caller's generator.
    pub fn run_with_rng<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        rng: &mut R,
    ) -> GaResult<O::Fitness> {
        let config = &self.config;
        let start = Instant::now();

        // 1. Initialize population
        let mut population = self.initial_population(problem, objective, rng);
        self.sort(problem, objective, &mut population);

        // 2. Track best
        let mut best = population[0].clone();
        self.report(&best);
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness.to_f64());

        let elite_count = config.elite_count();
        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    break;
                }
            }

            let mut next_gen: Vec<Candidate<O::Fitness>> = population[..elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let first = self
                    .tournament
                    .select_parent(problem, objective, &population, None, rng);
                let second =
                    self.tournament
                        .select_parent(problem, objective, &population, Some(first), rng);

                let mut child = if rng.random_bool(config.crossover_rate) {
                    self.crossover.crossover(
                        problem,
                        objective,
                        &population[first].tour,
                        &population[second].tour,
                        rng,
                    )
                } else {
                    population[first].clone()
                };

                if rng.random_bool(config.mutation_rate)
                    && self
                        .mutation
                        .apply(problem, objective, &mut child.tour, rng)
                        .is_some()
                {
                    child.fitness = objective.calculate(problem, &child.tour);
                }
                next_gen.push(child);
            }

            population = next_gen;
            self.sort(problem, objective, &mut population);
            generations = gen + 1;

            if population[0].is_better(problem, objective, &best) {
                best = population[0].clone();
                stagnation_counter = 0;
                log::debug!(
                    "GA[{}]: generation {generations} -> {:?}",
                    objective.name(),
                    best.fitness
                );
                self.report(&best);
            } else {
                stagnation_counter += 1;
            }
            fitness_history.push(best.fitness.to_f64());

            if config.stagnation_count > 0 && stagnation_counter >= config.stagnation_count {
                stagnated = true;
                break;
            }
        }

        GaResult {
            best,
            generations,
            stagnated,
            cancelled,
            fitness_history,
        }
    }

    fn initial_population<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        rng: &mut R,
    ) -> Vec<Candidate<O::Fitness>> {
        let size = self.config.population_size;
        if self.config.parallel {
            let seeds: Vec<u64> = (0..size).map(|_| rng.random()).collect();
            seeds
                .into_par_iter()
                .map(|seed| {
                    let mut worker_rng = StdRng::seed_from_u64(seed);
                    self.generator.solve(problem, objective, &mut worker_rng)
                })
                .collect()
        } else {
            (0..size)
                .map(|_| self.generator.solve(problem, objective, rng))
                .collect()
        }
    }

    fn sort(&self, problem: &P, objective: &O, population: &mut [Candidate<O::Fitness>]) {
        population.sort_by(|a, b| objective.compare(problem, a.fitness, b.fitness));
    }

    fn report(&self, best: &Candidate<O::Fitness>) {
        if let Some(reporter) = &self.reporter {
            reporter(best);
        }
    }
}

impl<P, O, G, C, M> Solver<P, O> for GaSolver<P, O, G, C, M>
where
    P: Sync,
    O: Objective<P>,
    G: Solver<P, O>,
    C: Crossover<P, O>,
    M: Operator<P, O>,
{
    fn name(&self) -> String {
        format!(
            "GA({}, {}, {})",
            self.generator.name(),
            self.crossover.name(),
            self.mutation.name()
        )
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        self.run_with_rng(problem, objective, rng).best
    }
}

// ============================================================================
// Tests
// ============================================================================
