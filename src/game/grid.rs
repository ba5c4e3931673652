use rand::Rng;

use super::state::Position;

/// The playing field: `width` x `height` cells, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// A cell drawn uniformly over the whole grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(0..self.width) as i32;
        let y = rng.gen_range(0..self.height) as i32;
        Position::new(x, y)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_random_cell_stays_inside() {
        let grid = Grid::new(7, 3);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_cells_enumerates_grid() {
        let grid = Grid::new(4, 3);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[4], Position::new(0, 1));
        assert!(cells.iter().all(|&c| grid.contains(c)));
    }
}
