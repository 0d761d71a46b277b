//! Configuration System
//!
//! Loads simulation parameters from a TOML file. Every section and field has
//! a default, so a partial file only overrides what it names.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::components::agent::Palette;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "ethnocentrism.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub dynamics: DynamicsConfig,
    pub payoff: PayoffConfig,
    pub run: RunConfig,
}

/// Grid geometry and color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Palette of agent colors (matplotlib codes in the reference setup)
    pub colors: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 50,
            colors: ["c", "m", "y", "r"].iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Stochastic population dynamics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Per-trait chance that an offspring trait is resampled
    pub mutation_rate: f64,
    /// Per-cell chance of being cleared each generation
    pub death_probability: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.005,
            death_probability: 0.10,
        }
    }
}

/// Prisoner's Dilemma payoff constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Reproduction potential every agent starts a generation with
    pub baseline_potential: f64,
    /// Potential lost by a cooperator
    pub give_cost: f64,
    /// Potential gained by the partner of a cooperator
    pub receive_benefit: f64,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            baseline_potential: 0.12,
            give_cost: 0.01,
            receive_benefit: 0.03,
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub generations: u64,
    /// Seed for the random source; a fresh one is picked when absent
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 1000,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Checks every parameter the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.world.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let mut seen = HashSet::new();
        for color in &self.world.colors {
            if !seen.insert(color.as_str()) {
                return Err(ConfigError::DuplicateColor(color.clone()));
            }
        }

        check_probability("mutation_rate", self.dynamics.mutation_rate)?;
        check_probability("death_probability", self.dynamics.death_probability)?;

        check_finite("baseline_potential", self.payoff.baseline_potential)?;
        check_finite("give_cost", self.payoff.give_cost)?;
        check_finite("receive_benefit", self.payoff.receive_benefit)?;
        Ok(())
    }

    /// Validates the configuration and extracts the engine parameters.
    pub fn params(&self) -> Result<SimParams, ConfigError> {
        self.validate()?;
        Ok(SimParams {
            size: self.world.size,
            palette: Palette::new(self.world.colors.clone()),
            mutation_rate: self.dynamics.mutation_rate,
            death_probability: self.dynamics.death_probability,
            payoff: Payoff {
                baseline_potential: self.payoff.baseline_potential,
                give_cost: self.payoff.give_cost,
                receive_benefit: self.payoff.receive_benefit,
            },
        })
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Payoff constants applied during interaction and reproduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payoff {
    pub baseline_potential: f64,
    pub give_cost: f64,
    pub receive_benefit: f64,
}

impl Default for Payoff {
    fn default() -> Self {
        let config = PayoffConfig::default();
        Self {
            baseline_potential: config.baseline_potential,
            give_cost: config.give_cost,
            receive_benefit: config.receive_benefit,
        }
    }
}

/// Validated engine parameters, fixed for the lifetime of a simulation.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimParams {
    pub size: usize,
    pub palette: Palette,
    pub mutation_rate: f64,
    pub death_probability: f64,
    pub payoff: Payoff,
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroSize,

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("color {0:?} appears more than once in the palette")]
    DuplicateColor(String),

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
