//! Runtime configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::simulation::error::ConfigError;
use crate::simulation::params::{
    DEFAULT_BOOTSTRAP_STEPS, DEFAULT_DIRT_DENSITY, DEFAULT_ITERATION_LIMIT, DEFAULT_WALL_DENSITY,
    DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, MIN_GRID_SIDE,
};

/// Settings for the mapping agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Width of the believed map in tiles
    pub width: usize,
    /// Height of the believed map in tiles
    pub height: usize,
    /// Random-walk steps taken before mapping starts
    pub bootstrap_steps: u32,
    /// Active cycles after which the agent only emits no-op
    pub iteration_limit: u32,
    /// Seed for the bootstrap walk; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            bootstrap_steps: DEFAULT_BOOTSTRAP_STEPS,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Config for a `width` x `height` grid, other fields defaulted.
    #[must_use]
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_bootstrap_steps(mut self, steps: u32) -> Self {
        self.bootstrap_steps = steps;
        self
    }

    #[must_use]
    pub const fn with_iteration_limit(mut self, limit: u32) -> Self {
        self.iteration_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the grid cannot hold Home inside
    /// its border walls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(ConfigError::invalid(format!(
                "agent grid {}x{} is smaller than {MIN_GRID_SIDE}x{MIN_GRID_SIDE}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Settings for the randomly generated world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    /// Chance that an interior floor tile starts dirty
    pub dirt_density: f64,
    /// Chance that an interior tile is a wall
    pub wall_density: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            dirt_density: DEFAULT_DIRT_DENSITY,
            wall_density: DEFAULT_WALL_DENSITY,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for undersized grids or densities
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(ConfigError::invalid(format!(
                "world grid {}x{} is smaller than {MIN_GRID_SIDE}x{MIN_GRID_SIDE}",
                self.width, self.height
            )));
        }
        for (name, value) in [
            ("dirt_density", self.dirt_density),
            ("wall_density", self.wall_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agent: AgentConfig,
    pub world: WorldConfig,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns the first validation failure from either section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        self.world.validate()
    }
}
