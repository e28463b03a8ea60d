use rand::{Rng, seq::IteratorRandom};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::config::GameConfig;
use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Playfield geometry in cells.
///
/// Row 0 holds the status bar; the playable rectangle is columns
/// `0..columns` and rows `1..rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    /// First playable row; row 0 is the status bar
    pub const FIRST_ROW: i32 = 1;

    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.columns(), config.rows())
    }

    /// Check if a cell is within the playable rectangle
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.col) && (Self::FIRST_ROW..self.rows).contains(&cell.row)
    }

    /// Number of playable cells
    pub fn playable_cells(&self) -> usize {
        (self.columns.max(0) * (self.rows - Self::FIRST_ROW).max(0)) as usize
    }

    /// Cells items may spawn on: the playable rectangle minus a one-cell
    /// margin along every outer edge.
    pub fn spawn_area(&self) -> impl Iterator<Item = Cell> + '_ {
        let rows = (Self::FIRST_ROW + 1)..(self.rows - 1);
        rows.flat_map(move |row| (1..self.columns - 1).map(move |col| Cell::new(col, row)))
    }

    /// Pick a uniformly random spawn cell not contained in `excluded`.
    ///
    /// Candidates are enumerated rather than rejection-sampled, so this
    /// terminates even on a nearly full board. Returns `None` when every
    /// spawn cell is excluded.
    pub fn random_free_cell<R: Rng>(
        &self,
        rng: &mut R,
        excluded: &HashSet<Cell>,
    ) -> Option<Cell> {
        self.spawn_area()
            .filter(|cell| !excluded.contains(cell))
            .choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(15, 10);

        assert!(grid.is_in_bounds(Cell::new(0, 1)));
        assert!(grid.is_in_bounds(Cell::new(14, 9)));
        assert!(!grid.is_in_bounds(Cell::new(0, 0))); // status bar
        assert!(!grid.is_in_bounds(Cell::new(-1, 5)));
        assert!(!grid.is_in_bounds(Cell::new(15, 5)));
        assert!(!grid.is_in_bounds(Cell::new(5, 10)));
        assert_eq!(grid.playable_cells(), 15 * 9);
    }

    #[test]
    fn test_spawn_area_keeps_margin() {
        let grid = Grid::new(15, 10);
        let cells: Vec<Cell> = grid.spawn_area().collect();

        assert_eq!(cells.len(), 13 * 7);
        for cell in cells {
            assert!(grid.is_in_bounds(cell));
            assert!((1..=13).contains(&cell.col));
            assert!((2..=8).contains(&cell.row));
        }
    }

    #[test]
    fn test_random_free_cell_avoids_excluded() {
        let grid = Grid::new(6, 6);
        let mut rng = StdRng::seed_from_u64(7);

        // Spawn area is cols 1..=4, rows 2..=4; leave a single cell free
        let mut excluded: HashSet<Cell> = grid.spawn_area().collect();
        excluded.remove(&Cell::new(3, 3));

        for _ in 0..20 {
            assert_eq!(grid.random_free_cell(&mut rng, &excluded), Some(Cell::new(3, 3)));
        }
    }

    #[test]
    fn test_random_free_cell_full_board() {
        let grid = Grid::new(6, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let excluded: HashSet<Cell> = grid.spawn_area().collect();

        assert_eq!(grid.random_free_cell(&mut rng, &excluded), None);
    }
}
