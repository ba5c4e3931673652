use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Action, Direction},
    config::{ConfigError, GameConfig},
    grid::Grid,
    placement::{PlacementError, RandomPlacer},
    state::{CollisionType, Position, RoundPhase, RoundState, TerminationCause, Worm},
};

/// Something the audio (or any other) collaborator may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The worm ate the food at `position`; `score` is the new score
    FoodConsumed { position: Position, score: u32 },
    /// The round is over
    RoundTerminated(TerminationCause),
}

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickInfo {
    /// Whether the worm ate food this tick
    pub ate_food: bool,
    /// Obstacle placed this tick, if any
    pub new_obstacle: Option<Position>,
    /// Why the round ended, if it ended this tick
    pub termination: Option<TerminationCause>,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Whether the round has terminated
    pub terminated: bool,
    pub score: u32,
    /// Pacing for the next frame, in ticks per second
    pub tick_rate: u32,
    pub events: Vec<GameEvent>,
    pub info: TickInfo,
}

/// The simulation engine: owns the configuration and the round's RNG,
/// and advances a [`RoundState`] one tick at a time
pub struct GameEngine {
    config: GameConfig,
    placer: RandomPlacer,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine, rejecting configurations the round could not
    /// start from (e.g. a worm wider than the grid)
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::new(config.grid_width, config.grid_height);
        let placer = RandomPlacer::new(grid, config.max_placement_attempts);

        Ok(Self { config, placer, rng })
    }

    pub fn grid(&self) -> Grid {
        self.placer.grid()
    }

    /// Start a new round: a straight worm heading right, food placed away
    /// from its head, no obstacles, score 0
    pub fn reset(&mut self) -> Result<RoundState, PlacementError> {
        let grid = self.grid();
        let length = self.config.initial_worm_length.max(1);
        let head = self.spawn_head(grid, length);

        let worm = Worm::new(head, Direction::Right, length);
        let forbidden: HashSet<Position> = worm.body.iter().copied().collect();
        let food = self
            .placer
            .place(&mut self.rng, head, self.config.exclusion_radius, &forbidden)?;

        let mut state = RoundState::new(worm, food, grid);
        state.tick_rate = self.config.difficulty.policy_for(0).tick_rate;

        info!(
            "round started on {}x{} grid, head at {}, food at {}",
            grid.width, grid.height, head, food
        );
        Ok(state)
    }

    /// Advance the round by one tick
    pub fn tick(&mut self, state: &mut RoundState, action: Action) -> TickOutcome {
        if let RoundPhase::Terminated(_) = state.phase {
            return TickOutcome {
                terminated: true,
                score: state.score,
                tick_rate: state.tick_rate,
                events: Vec::new(),
                info: TickInfo {
                    ate_food: false,
                    new_obstacle: None,
                    termination: None,
                },
            };
        }

        // Reversing onto the neck is silently ignored
        if let Action::Move(direction) = action {
            if !state.worm.direction.is_opposite(direction) {
                state.worm.direction = direction;
            }
        }

        let new_head = state.worm.peek_move(state.worm.direction);
        let ate_food = new_head == state.food.position();

        if let Some(collision) = self.check_collision(state, new_head, ate_food) {
            state.steps += 1;
            let cause = TerminationCause::Collision(collision);
            return self.terminate(state, cause, false, Vec::new());
        }

        let mut events = Vec::new();
        let mut new_obstacle = None;
        let mut exhausted = false;

        if ate_food {
            state.score += 1;
            events.push(GameEvent::FoodConsumed {
                position: new_head,
                score: state.score,
            });
            debug!("food eaten at {}, score {}", new_head, state.score);

            match self.respawn_food_and_obstacle(state, new_head) {
                Ok(obstacle) => new_obstacle = obstacle,
                Err(err) => {
                    warn!("ending round: {err}");
                    exhausted = true;
                }
            }
        }

        state.worm.advance(new_head, ate_food);
        state.steps += 1;
        state.tick_rate = self.config.difficulty.policy_for(state.score).tick_rate;

        if exhausted {
            return self.terminate(state, TerminationCause::PlacementExhausted, true, events);
        }

        TickOutcome {
            terminated: false,
            score: state.score,
            tick_rate: state.tick_rate,
            events,
            info: TickInfo {
                ate_food,
                new_obstacle,
                termination: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &RoundState,
        pos: Position,
        grow: bool,
    ) -> Option<CollisionType> {
        if !state.grid.contains(pos) {
            return Some(CollisionType::Wall);
        }

        if state.worm.collides_with_self(pos, grow) {
            return Some(CollisionType::SelfCollision);
        }

        if state.obstacles.contains(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Move the food away from the new head and top the obstacle field up
    /// to the current target. Returns the obstacle placed, if any.
    fn respawn_food_and_obstacle(
        &mut self,
        state: &mut RoundState,
        new_head: Position,
    ) -> Result<Option<Position>, PlacementError> {
        let radius = self.config.exclusion_radius;

        let mut forbidden = state.occupied_cells();
        forbidden.insert(new_head);

        let food = self
            .placer
            .place(&mut self.rng, new_head, radius, &forbidden)?;
        state.food.relocate(food);
        debug!("food moved to {}", food);

        let target = self.config.difficulty.policy_for(state.score).target_obstacles;
        if target <= state.obstacles.count() {
            return Ok(None);
        }

        forbidden.insert(food);
        let obstacle = self
            .placer
            .place(&mut self.rng, new_head, radius, &forbidden)?;
        state.obstacles.add(obstacle);
        debug!(
            "obstacle placed at {} ({} total)",
            obstacle,
            state.obstacles.count()
        );

        Ok(Some(obstacle))
    }

    fn terminate(
        &self,
        state: &mut RoundState,
        cause: TerminationCause,
        ate_food: bool,
        mut events: Vec<GameEvent>,
    ) -> TickOutcome {
        state.phase = RoundPhase::Terminated(cause);
        events.push(GameEvent::RoundTerminated(cause));
        info!(
            "round over after {} ticks: {:?}, score {}",
            state.steps, cause, state.score
        );

        TickOutcome {
            terminated: true,
            score: state.score,
            tick_rate: state.tick_rate,
            events,
            info: TickInfo {
                ate_food,
                new_obstacle: None,
                termination: Some(cause),
            },
        }
    }

    /// Random head cell at least `spawn_margin` from the walls, with room
    /// for the body trailing to the left. Small grids fall back to the
    /// left-most legal column on the middle row.
    fn spawn_head(&mut self, grid: Grid, length: usize) -> Position {
        let margin = self.config.spawn_margin;

        let x_lo = margin.max(length - 1);
        let x = match grid.width.checked_sub(margin + 1) {
            Some(x_hi) if x_lo <= x_hi => self.rng.gen_range(x_lo..=x_hi),
            _ => (length - 1).min(grid.width.saturating_sub(1)),
        };

        let y = match grid.height.checked_sub(margin + 1) {
            Some(y_hi) if margin <= y_hi => self.rng.gen_range(margin..=y_hi),
            _ => grid.height / 2,
        };

        Position::new(x as i32, y as i32)
    }
}
