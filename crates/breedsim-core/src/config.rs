//! Session configuration.
//!
//! Defaults reproduce the standard game: a $100 budget, litters of 10 and
//! a coin flip per inherited trait. Partial JSON documents fill the rest
//! from the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generation::LITTER_SIZE;

pub const STARTING_BUDGET: u32 = 100;
pub const INHERITANCE_CHANCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Budget at generation 1 and after every restart.
    pub starting_budget: u32,
    /// Dogs per generation.
    pub population_size: usize,
    /// Chance each new dog receives each inherited trait.
    pub inheritance_chance: f64,
    /// Seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_budget: STARTING_BUDGET,
            population_size: LITTER_SIZE,
            inheritance_chance: INHERITANCE_CHANCE,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Default config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be at least 1".into()));
        }
        if self.starting_budget == 0 {
            return Err(ConfigError::Invalid("starting_budget must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.inheritance_chance) {
            return Err(ConfigError::Invalid(format!(
                "inheritance_chance {} is outside 0..=1",
                self.inheritance_chance
            )));
        }
        Ok(())
    }
}
