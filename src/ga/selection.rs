//! Tournament selection for the GA.
//!
//! A tournament samples a fraction of the population without replacement,
//! ranks the contestants by fitness and walks the ranking from the best,
//! accepting each contestant with probability `p`. With `p = 1` this is the
//! classic deterministic tournament; smaller `p` lowers the selection
//! pressure. A tournament where nobody is accepted selects no one and the
//! caller simply runs another one.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::objective::{Candidate, Objective};
use rand::Rng;

/// Tournaments tried by [`Tournament::select_parent`] before falling back
/// to the best eligible individual.
const MAX_TOURNAMENTS: usize = 64;

/// Probabilistic tournament selection.
///
/// # Examples
///
/// ```
/// use u_tour::ga::Tournament;
///
/// let tournament = Tournament::new(0.1, 0.9);
/// assert_eq!(tournament.contestants(100), 10);
/// assert_eq!(tournament.contestants(3), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tournament {
    /// Fraction of the population sampled per tournament.
    pub size: f64,
    /// Acceptance probability at each rank.
    pub probability: f64,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(0.05, 0.9)
    }
}

impl Tournament {
    /// Creates a tournament, clamping both parameters to `[0, 1]`.
    pub fn new(size: f64, probability: f64) -> Self {
        Self {
            size: size.clamp(0.0, 1.0),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Number of contestants drawn from a population of `n`.
    pub fn contestants(&self, n: usize) -> usize {
        ((n as f64 * self.size).round() as usize).clamp(1, n.max(1))
    }

    /// Runs one tournament.
    ///
    /// Returns the index of the selected individual, or `None` when every
    /// contestant was declined. `exclude` is never selected.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<P, O, R>(
        &self,
        problem: &P,
        objective: &O,
        population: &[Candidate<O::Fitness>],
        exclude: Option<usize>,
        rng: &mut R,
    ) -> Option<usize>
    where
        O: Objective<P>,
        R: Rng,
    {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        let n = population.len();
        let mut contestants = rand::seq::index::sample(rng, n, self.contestants(n)).into_vec();
        contestants.retain(|&i| Some(i) != exclude);
        contestants.sort_by(|&a, &b| {
            objective.compare(problem, population[a].fitness, population[b].fitness)
        });

        contestants
            .into_iter()
            .find(|_| rng.random_bool(self.probability))
    }

    /// Selects a parent, retrying declined tournaments.
    ///
    /// After repeated declines falls back to the best individual other than
    /// `exclude`.
    pub fn select_parent<P, O, R>(
        &self,
        problem: &P,
        objective: &O,
        population: &[Candidate<O::Fitness>],
        exclude: Option<usize>,
        rng: &mut R,
    ) -> usize
    where
        O: Objective<P>,
        R: Rng,
    {
        for _ in 0..MAX_TOURNAMENTS {
            if let Some(i) = self.select(problem, objective, population, exclude, rng) {
                return i;
            }
        }
        (0..population.len())
            .filter(|&i| Some(i) != exclude)
            .min_by(|&a, &b| {
                objective.compare(problem, population[a].fitness, population[b].fitness)
            })
            .unwrap_or(0)
    }
}
