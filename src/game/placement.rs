//! Random placement of food and obstacles
//!
//! Rejection sampling over the grid: cheap while the board is sparse, which
//! the difficulty curve keeps it. Once `max_attempts` draws have been
//! rejected the placer enumerates every legal cell instead, so it either
//! finds one or fails without looping.

use std::collections::HashSet;

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use super::grid::Grid;
use super::state::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell outside {radius} cells of {center} with {forbidden} cells forbidden")]
    NoFreeCell {
        center: Position,
        radius: u32,
        forbidden: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct RandomPlacer {
    grid: Grid,
    max_attempts: usize,
}

impl RandomPlacer {
    pub fn new(grid: Grid, max_attempts: usize) -> Self {
        Self { grid, max_attempts }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Pick a uniformly random cell outside the exclusion box around
    /// `center` that is not in `forbidden`.
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        center: Position,
        radius: u32,
        forbidden: &HashSet<Position>,
    ) -> Result<Position, PlacementError> {
        let allowed = |pos: Position| !pos.is_within_box(center, radius) && !forbidden.contains(&pos);

        if self.grid.cell_count() > 0 {
            for _ in 0..self.max_attempts {
                let candidate = self.grid.random_cell(rng);
                if allowed(candidate) {
                    return Ok(candidate);
                }
            }
        }

        let free: Vec<Position> = self.grid.cells().filter(|&pos| allowed(pos)).collect();
        match free.choose(rng) {
            Some(&pos) => {
                warn!(
                    "placement fell back to exhaustive search after {} attempts ({} free cells)",
                    self.max_attempts,
                    free.len()
                );
                Ok(pos)
            }
            None => Err(PlacementError::NoFreeCell {
                center,
                radius,
                forbidden: forbidden.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_place_respects_constraints() {
        let placer = RandomPlacer::new(Grid::new(20, 20), 100);
        let mut rng = StdRng::seed_from_u64(1);
        let center = Position::new(10, 10);
        let forbidden: HashSet<_> = [Position::new(0, 0), Position::new(19, 19)].into();

        for _ in 0..200 {
            let pos = placer.place(&mut rng, center, 5, &forbidden).unwrap();
            assert!(placer.grid().contains(pos));
            assert!(!pos.is_within_box(center, 5));
            assert!(!forbidden.contains(&pos));
        }
    }

    #[test]
    fn test_single_free_cell_found_via_fallback() {
        let grid = Grid::new(3, 3);
        let placer = RandomPlacer::new(grid, 0);
        let mut rng = StdRng::seed_from_u64(2);
        let forbidden: HashSet<_> = grid
            .cells()
            .filter(|&pos| pos != Position::new(2, 2))
            .collect();

        let pos = placer.place(&mut rng, Position::new(0, 0), 0, &forbidden).unwrap();
        assert_eq!(pos, Position::new(2, 2));
    }

    #[test]
    fn test_exhaustion_fails_instead_of_hanging() {
        // 8x8 grid, box of radius 5 around (3, 3) covers every cell
        let placer = RandomPlacer::new(Grid::new(8, 8), 50);
        let mut rng = StdRng::seed_from_u64(3);

        let err = placer
            .place(&mut rng, Position::new(3, 3), 5, &HashSet::new())
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::NoFreeCell {
                center: Position::new(3, 3),
                radius: 5,
                forbidden: 0,
            }
        );
    }

    #[test]
    fn test_exhaustion_from_box_plus_forbidden() {
        let grid = Grid::new(8, 8);
        let placer = RandomPlacer::new(grid, 50);
        let mut rng = StdRng::seed_from_u64(4);
        let center = Position::new(0, 0);
        let forbidden: HashSet<_> = grid
            .cells()
            .filter(|pos| !pos.is_within_box(center, 5))
            .collect();

        assert!(placer.place(&mut rng, center, 5, &forbidden).is_err());
    }

    #[test]
    fn test_empty_grid_fails() {
        let placer = RandomPlacer::new(Grid::new(0, 0), 10);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(placer.place(&mut rng, Position::new(0, 0), 0, &HashSet::new()).is_err());
    }

    proptest! {
        #[test]
        fn prop_placed_cell_is_legal(
            seed in any::<u64>(),
            cx in 0i32..16,
            cy in 0i32..12,
            radius in 0u32..6,
        ) {
            let grid = Grid::new(16, 12);
            let placer = RandomPlacer::new(grid, 20);
            let mut rng = StdRng::seed_from_u64(seed);
            let center = Position::new(cx, cy);
            let forbidden: HashSet<_> = (0..16).map(|x| Position::new(x, 0)).collect();

            match placer.place(&mut rng, center, radius, &forbidden) {
                Ok(pos) => {
                    prop_assert!(grid.contains(pos));
                    prop_assert!(!pos.is_within_box(center, radius));
                    prop_assert!(!forbidden.contains(&pos));
                }
                Err(_) => {
                    prop_assert!(grid
                        .cells()
                        .all(|pos| pos.is_within_box(center, radius) || forbidden.contains(&pos)));
                }
            }
        }
    }
}
