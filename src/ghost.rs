//! The hidden ghost and its evasive relocation policy.
//!
//! A relocation prefers cells that carry no inquiry evidence at all: the cell
//! itself and its eight neighbours must be uninquired. When no such cell
//! exists the ghost takes any cell other than its current one. Each
//! relocation spends one unit of the move budget; with the budget exhausted
//! the ghost stays put.

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{grid::Grid, types::Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ghost {
    position: Position,
    moves_left: u32,
}

impl Ghost {
    /// Place the ghost uniformly at random on a `grid_size × grid_size` grid.
    pub fn place<R: Rng>(grid_size: usize, move_budget: u32, rng: &mut R) -> Self {
        let row = rng.random_range(0..grid_size);
        let col = rng.random_range(0..grid_size);
        Self::at((row, col), move_budget)
    }

    /// Place the ghost on a known cell.
    pub fn at(position: Position, move_budget: u32) -> Self {
        Self {
            position,
            moves_left: move_budget,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn can_move(&self) -> bool {
        self.moves_left > 0
    }

    /// Cells the ghost would prefer to move to: not inquired, with no
    /// inquired neighbour, and not its current cell.
    pub fn evasive_candidates(&self, grid: &Grid) -> Vec<Position> {
        grid.all()
            .filter(|cell| cell.position() != self.position && !cell.is_inquired())
            .filter(|cell| {
                !grid
                    .neighbors(cell.row(), cell.col(), 1)
                    .iter()
                    .any(|neighbor| neighbor.is_inquired())
            })
            .map(|cell| cell.position())
            .collect()
    }

    /// Move to a new cell according to the evasive policy.
    ///
    /// Returns whether the position changed. No-op once the budget is spent,
    /// or on a single-cell grid where there is nowhere else to go.
    pub fn relocate<R: Rng>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        if !self.can_move() {
            debug!(position = ?self.position, "ghost has no moves left");
            return false;
        }

        let mut candidates = self.evasive_candidates(grid);
        if candidates.is_empty() {
            candidates = grid.positions().filter(|&pos| pos != self.position).collect();
        }

        let Some(&next) = candidates.choose(rng) else {
            return false;
        };

        self.position = next;
        self.moves_left -= 1;
        debug!(position = ?next, moves_left = self.moves_left, "ghost relocated");
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::types::Signal;

    fn inquire(grid: &mut Grid, row: usize, col: usize) {
        grid.get_mut(row, col)
            .expect("position in range")
            .mark_inquired(Signal::Green);
    }

    #[test]
    fn placement_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let ghost = Ghost::place(8, 3, &mut rng);
            let (row, col) = ghost.position();
            assert!(row < 8 && col < 8);
            assert_eq!(ghost.moves_left(), 3);
        }
    }

    #[test]
    fn relocation_avoids_inquired_evidence() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(6);
        inquire(&mut grid, 2, 2);
        inquire(&mut grid, 4, 4);

        for _ in 0..50 {
            let mut ghost = Ghost::at((0, 0), 1);
            assert!(ghost.relocate(&grid, &mut rng));
            let (row, col) = ghost.position();
            assert!(!grid.get(row, col).unwrap().is_inquired());
            assert!(
                grid.neighbors(row, col, 1)
                    .iter()
                    .all(|cell| !cell.is_inquired()),
                "ghost landed next to evidence at ({row}, {col})"
            );
        }
    }

    #[test]
    fn relocation_falls_back_to_any_other_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(2);
        inquire(&mut grid, 0, 0);

        let mut ghost = Ghost::at((1, 1), 2);
        assert!(ghost.evasive_candidates(&grid).is_empty());
        assert!(ghost.relocate(&grid, &mut rng));
        assert_ne!(ghost.position(), (1, 1));
        assert_eq!(ghost.moves_left(), 1);
    }

    #[test]
    fn exhausted_budget_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(5);
        let mut ghost = Ghost::at((2, 2), 0);
        assert!(!ghost.relocate(&grid, &mut rng));
        assert_eq!(ghost.position(), (2, 2));
        assert_eq!(ghost.moves_left(), 0);
    }

    #[test]
    fn single_cell_grid_keeps_budget() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(1);
        let mut ghost = Ghost::at((0, 0), 3);
        assert!(!ghost.relocate(&grid, &mut rng));
        assert_eq!(ghost.moves_left(), 3);
    }
}
