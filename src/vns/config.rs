//! Variable Neighborhood Search configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for Variable Neighborhood Search.
///
/// The default stopping rule ends the search once `max_iterations` shaking
/// steps were made or the perturbation level climbs past `level_max`.
///
/// # Examples
///
/// ```
/// use u_tour::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_iterations(1000)
///     .with_level_max(8);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.level_max, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VnsConfig {
    /// Maximum number of shaking steps.
    pub max_iterations: usize,
    /// Highest perturbation level tried before giving up.
    pub level_max: usize,
    /// Random seed (`None` draws one from the thread generator).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            level_max: 10,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the maximum number of shaking steps.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the highest perturbation level (at least 1).
    pub fn with_level_max(mut self, level: usize) -> Self {
        self.level_max = level.max(1);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for short searches inside repeated or nested runs.
    pub fn fast() -> Self {
        Self {
            max_iterations: 200,
            level_max: 5,
            seed: None,
        }
    }

    /// Preset for a thorough single search.
    pub fn quality() -> Self {
        Self {
            max_iterations: 5000,
            level_max: 20,
            seed: None,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.level_max == 0 {
            return Err(Error::InvalidConfig("level_max must be at least 1".into()));
        }
        Ok(())
    }
}
