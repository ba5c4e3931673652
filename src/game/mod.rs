//! Core simulation for Wormy
//!
//! Everything here is free of I/O and rendering: the frame loop feeds one
//! [`Action`] per tick into [`GameEngine::tick`] and reads [`RoundState`]
//! back for drawing.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod grid;
pub mod placement;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use engine::{GameEngine, GameEvent, TickInfo, TickOutcome};
pub use grid::Grid;
pub use placement::{PlacementError, RandomPlacer};
pub use state::{
    CollisionType, Food, ObstacleField, Position, RoundPhase, RoundState, TerminationCause, Worm,
};
