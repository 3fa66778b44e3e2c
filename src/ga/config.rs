//! GA configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings of [`GaSolver`](super::GaSolver).
///
/// Mutation in a tour GA is usually a local search, so populations are
/// small compared to a bit-string GA and most of the work per generation is
/// spent in the mutation operator.
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_tournament_size(0.1)
///     .with_mutation_rate(0.3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.elite_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Tours per generation.
    pub population_size: usize,

    /// Upper bound on generations.
    pub max_generations: usize,

    /// Share of the best tours copied unchanged into the next generation.
    pub elite_ratio: f64,

    /// Chance that a child is recombined from two parents; otherwise it is
    /// a copy of the first parent.
    pub crossover_rate: f64,

    /// Chance that the mutation operator runs on a child.
    pub mutation_rate: f64,

    /// Share of the population entering each tournament (at least one tour).
    pub tournament_size: f64,

    /// Chance of taking the contestant at the current rank of a tournament.
    pub tournament_probability: f64,

    /// Generations without a new best tour before the run stops; 0 never
    /// stops on stagnation.
    pub stagnation_count: usize,

    /// Build and score the initial population on the rayon pool.
    pub parallel: bool,

    /// Seed of the run's generator; `None` draws one.
    pub seed: Option<u64>,

    /// Wall-clock budget in milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            tournament_size: 0.1,
            tournament_probability: 0.9,
            stagnation_count: 30,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Share of the population, clamped to `[0, 1]`.
    pub fn with_tournament_size(mut self, ratio: f64) -> Self {
        self.tournament_size = ratio.clamp(0.0, 1.0);
        self
    }

    /// Clamped to `[0, 1]`; zero is rejected by [`validate`](Self::validate).
    pub fn with_tournament_probability(mut self, p: f64) -> Self {
        self.tournament_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_stagnation_count(mut self, count: usize) -> Self {
        self.stagnation_count = count;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Elites per generation, rounded down.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Small population for nested or repeated runs.
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_generations: 50,
            stagnation_count: 10,
            time_limit_ms: Some(5_000),
            ..Self::default()
        }
    }

    /// The defaults with a 30 s budget.
    pub fn balanced() -> Self {
        Self {
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Large population and long patience.
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            stagnation_count: 60,
            mutation_rate: 0.3,
            time_limit_ms: Some(120_000),
            ..Self::default()
        }
    }

    /// Picks a preset by instance size and sizes the population to it.
    ///
    /// Below 30 visits the [`fast`](Self::fast) preset is used, below 150
    /// [`balanced`](Self::balanced), otherwise [`quality`](Self::quality).
    /// The population is twice the visit count, kept within the preset's
    /// population and 20.
    pub fn auto_select(visit_count: usize) -> Self {
        let preset = if visit_count < 30 {
            Self::fast()
        } else if visit_count < 150 {
            Self::balanced()
        } else {
            Self::quality()
        };
        let population_size = (visit_count * 2).clamp(20, preset.population_size.max(20));
        Self {
            population_size,
            ..preset
        }
    }

    /// Checks the settings [`GaSolver::new`](super::GaSolver::new) relies on.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig("max_generations must be at least 1".into()));
        }
        for (name, value) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("tournament_size", self.tournament_size),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        if self.elite_count() >= self.population_size {
            return Err(Error::InvalidConfig(
                "elite_ratio leaves no room for children".into(),
            ));
        }
        let p = self.tournament_probability;
        if p.is_nan() || p <= 0.0 || p > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "tournament_probability must lie in (0, 1], got {p}"
            )));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::InvalidConfig("time_limit_ms must be positive".into()));
        }
        Ok(())
    }
}
