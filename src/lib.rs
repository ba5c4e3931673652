//! Wormy - a Nibbles-style worm game for the terminal
//!
//! This library provides:
//! - The simulation core (game module): worm, food, obstacles, difficulty
//! - Sound cues for engine events (audio module)
//! - TUI rendering and keyboard input (render and input modules)
//! - The interactive frame loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
