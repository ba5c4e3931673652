use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::difficulty::BASE_TICK_RATE;
use super::grid::Grid;

/// A cell on the game grid.
///
/// Values outside the grid are representable so that a candidate head can
/// be tested against the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True if `self` lies inside the axis-aligned box of half-size
    /// `radius` centred on `center` (strictly closer than `radius` on both axes)
    pub fn is_within_box(&self, center: Position, radius: u32) -> bool {
        let radius = radius as i32;
        (self.x - center.x).abs() < radius && (self.y - center.y).abs() < radius
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The worm: ordered body segments plus heading
#[derive(Debug, Clone, PartialEq)]
pub struct Worm {
    /// Body segments, with head at index 0. Never empty.
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Worm {
    /// Create a straight worm whose segments trail behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a worm from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Candidate head cell one step in `direction`; does not move the worm
    pub fn peek_move(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Prepend `new_head`; drop the tail unless `grow`
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Would moving the head onto `cell` hit the body?
    ///
    /// Checked against the body before the move. On a move that does not
    /// grow, the tail leaves its cell this same tick, so stepping onto the
    /// current tail cell is legal. On a growing move the tail stays put.
    pub fn collides_with_self(&self, cell: Position, grow: bool) -> bool {
        let occupied = if grow || self.body.len() == 1 {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        occupied.contains(&cell)
    }

    pub fn head_out_of_bounds(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }

    /// Check if the worm occupies `pos` (any segment)
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the worm is empty (cannot happen through the public API)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The single food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }
}

/// Static obstacles. Cells are only ever added during a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleField {
    cells: HashSet<Position>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Add an obstacle; returns false if the cell was already taken
    pub fn add(&mut self, pos: Position) -> bool {
        self.cells.insert(pos)
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    pub fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Worm left the grid
    Wall,
    /// Worm ran into itself
    SelfCollision,
    /// Worm ran into an obstacle
    Obstacle,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    Collision(CollisionType),
    /// No legal cell was left for food or an obstacle
    PlacementExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Terminated(TerminationCause),
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub worm: Worm,
    pub food: Food,
    pub obstacles: ObstacleField,
    pub grid: Grid,
    pub score: u32,
    pub steps: u32,
    /// Ticks per second the frame loop should run at
    pub tick_rate: u32,
    pub phase: RoundPhase,
}

impl RoundState {
    /// Create a fresh round: score 0, no obstacles, running
    pub fn new(worm: Worm, food: Position, grid: Grid) -> Self {
        Self {
            worm,
            food: Food::new(food),
            obstacles: ObstacleField::new(),
            grid,
            score: 0,
            steps: 0,
            tick_rate: BASE_TICK_RATE,
            phase: RoundPhase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn termination(&self) -> Option<TerminationCause> {
        match self.phase {
            RoundPhase::Running => None,
            RoundPhase::Terminated(cause) => Some(cause),
        }
    }

    /// Cells neither food nor obstacles may land on, as of now
    pub fn occupied_cells(&self) -> HashSet<Position> {
        let mut occupied = self.obstacles.cells().clone();
        occupied.extend(self.worm.body.iter().copied());
        occupied
    }
}
