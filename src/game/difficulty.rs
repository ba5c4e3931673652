//! Score-driven difficulty curve
//!
//! Both the tick rate and the obstacle target are monotone step functions
//! of the score.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Ticks per second at score 0
pub const BASE_TICK_RATE: u32 = 15;
/// Upper bound for the tick rate
pub const MAX_TICK_RATE: u32 = 30;
/// Points needed for each +1 tick per second
pub const POINTS_PER_SPEEDUP: u32 = 3;
/// Points needed for each additional obstacle
pub const POINTS_PER_OBSTACLE: u32 = 4;

/// Tunable constants of the difficulty curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base_tick_rate: u32,
    pub max_tick_rate: u32,
    pub points_per_speedup: u32,
    pub points_per_obstacle: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_tick_rate: BASE_TICK_RATE,
            max_tick_rate: MAX_TICK_RATE,
            points_per_speedup: POINTS_PER_SPEEDUP,
            points_per_obstacle: POINTS_PER_OBSTACLE,
        }
    }
}

/// Pacing and obstacle target for a given score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Number of obstacles the field should hold
    pub target_obstacles: usize,
}

impl DifficultyConfig {
    /// Difficulty for `score`.
    ///
    /// Divisors of zero are treated as "never": the curve stays flat.
    pub fn policy_for(&self, score: u32) -> Difficulty {
        let speedup = score.checked_div(self.points_per_speedup).unwrap_or(0);
        let tick_rate = self
            .base_tick_rate
            .saturating_add(speedup)
            .clamp(self.base_tick_rate, self.max_tick_rate.max(self.base_tick_rate));

        let target_obstacles = score.checked_div(self.points_per_obstacle).unwrap_or(0) as usize;

        Difficulty {
            tick_rate,
            target_obstacles,
        }
    }
}

/// Wall-clock time between two ticks at `tick_rate` ticks per second
pub fn tick_period(tick_rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1)))
}
