use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Session statistics shown in the header. Kept in memory only.
pub struct GameMetrics {
    pub round_started: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            food_eaten: 0,
        }
    }

    /// Refresh the round clock
    pub fn update(&mut self) {
        self.elapsed_time = self.round_started.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodConsumed { .. } => self.food_eaten += 1,
            GameEvent::RoundTerminated(_) => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
