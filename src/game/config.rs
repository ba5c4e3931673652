use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::DifficultyConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Length of the worm at round start
    pub initial_worm_length: usize,
    /// Half-size of the box around the worm's head where nothing spawns
    pub exclusion_radius: u32,
    /// Minimum distance between the spawning head and the walls
    pub spawn_margin: usize,
    /// Random draws before placement switches to an exhaustive scan
    pub max_placement_attempts: usize,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub difficulty: DifficultyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_worm_length: 3,
            exclusion_radius: 5,
            spawn_margin: 5,
            max_placement_attempts: 1000,
            seed: None,
            difficulty: DifficultyConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_worm_length == 0 || self.initial_worm_length > self.grid_width {
            return Err(ConfigError::Invalid(format!(
                "initial worm length {} does not fit a grid {} cells wide",
                self.initial_worm_length, self.grid_width
            )));
        }
        let difficulty = &self.difficulty;
        if difficulty.base_tick_rate == 0 || difficulty.max_tick_rate < difficulty.base_tick_rate {
            return Err(ConfigError::Invalid(format!(
                "tick rates must satisfy 0 < base ({}) <= max ({})",
                difficulty.base_tick_rate, difficulty.max_tick_rate
            )));
        }
        if difficulty.points_per_speedup == 0 || difficulty.points_per_obstacle == 0 {
            return Err(ConfigError::Invalid(
                "points per speed-up and per obstacle must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
