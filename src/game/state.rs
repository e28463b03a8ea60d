use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::item::Item;

/// Why a move ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum CollisionKind {
    /// Snake left the playable rectangle
    #[error("snake left the playfield")]
    OutOfBounds,
    /// Snake ran into one of its own segments
    #[error("snake ran into itself")]
    SelfCollision,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Where the head lands on the next move
    pub fn next_head(&self) -> Cell {
        self.head().moved_in_direction(self.direction)
    }

    /// Check if a cell is covered by any segment, head and tail included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Apply a turn request; reversals are ignored
    pub fn steer(&mut self, requested: Direction) {
        self.direction = self.direction.steer(requested);
    }

    /// Compute the snake after one move in its current direction.
    ///
    /// The new head is checked against every current segment, the tail
    /// included, even though the tail would be vacated on a non-growing
    /// move.
    pub fn advance(&self, grid: &Grid, grow: bool) -> Result<Snake, CollisionKind> {
        let new_head = self.next_head();

        if !grid.is_in_bounds(new_head) {
            return Err(CollisionKind::OutOfBounds);
        }
        if self.occupies(new_head) {
            return Err(CollisionKind::SelfCollision);
        }

        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body);
        if !grow {
            body.pop();
        }

        Ok(Snake {
            body,
            direction: self.direction,
        })
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub snake: Snake,
    pub item: Item,
    pub score: i32,
    /// Ticks per second
    pub tick_rate: u32,
    pub ticks: u32,
    pub is_alive: bool,
    /// Set on the tick the round ended
    pub collision: Option<CollisionKind>,
}

impl RoundState {
    /// Create a new round state
    pub fn new(snake: Snake, item: Item, tick_rate: u32) -> Self {
        Self {
            snake,
            item,
            score: 0,
            tick_rate,
            ticks: 0,
            is_alive: true,
            collision: None,
        }
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&(c, r)| Cell::new(c, r)).collect()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(5, 5));
    }

    #[test]
    fn test_advance_without_growing() {
        let grid = Grid::new(15, 10);
        let snake = Snake::from_segments(cells(&[(6, 5), (5, 5)]), Direction::Right);

        let moved = snake.advance(&grid, false).unwrap();
        assert_eq!(moved.body, cells(&[(7, 5), (6, 5)]));
        // The input snake is left untouched
        assert_eq!(snake.body, cells(&[(6, 5), (5, 5)]));
    }

    #[test]
    fn test_advance_growing_adds_one_segment() {
        let grid = Grid::new(15, 10);
        let snake = Snake::from_segments(cells(&[(6, 5), (5, 5)]), Direction::Right);

        let grown = snake.advance(&grid, true).unwrap();
        assert_eq!(grown.body, cells(&[(7, 5), (6, 5), (5, 5)]));
        assert_eq!(grown.len(), snake.len() + 1);
    }

    #[test]
    fn test_advance_out_of_bounds_every_edge() {
        let grid = Grid::new(15, 10);
        let cases = [
            (Cell::new(0, 5), Direction::Left),
            (Cell::new(14, 5), Direction::Right),
            (Cell::new(5, 1), Direction::Up), // row 0 is the status bar
            (Cell::new(5, 9), Direction::Down),
        ];

        for (head, direction) in cases {
            let snake = Snake::new(head, direction);
            assert_eq!(snake.advance(&grid, false), Err(CollisionKind::OutOfBounds));
        }
    }

    #[test]
    fn test_advance_never_leaves_grid_silently() {
        let grid = Grid::new(6, 6);
        for col in 0..grid.columns {
            for row in Grid::FIRST_ROW..grid.rows {
                for direction in Direction::ALL {
                    let snake = Snake::new(Cell::new(col, row), direction);
                    match snake.advance(&grid, false) {
                        Ok(moved) => assert!(grid.is_in_bounds(moved.head())),
                        Err(kind) => {
                            assert_eq!(kind, CollisionKind::OutOfBounds);
                            assert!(!grid.is_in_bounds(snake.next_head()));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_self_collision_on_body() {
        let grid = Grid::new(15, 10);
        // Closed loop; the head at (5,5) moving down lands on (5,6)
        let snake = Snake::from_segments(
            cells(&[(5, 5), (5, 6), (5, 7), (6, 7), (6, 6), (6, 5)]),
            Direction::Down,
        );
        assert_eq!(snake.advance(&grid, false), Err(CollisionKind::SelfCollision));
    }

    #[test]
    fn test_stepping_onto_tail_is_a_collision() {
        let grid = Grid::new(15, 10);
        // 2x2 square: the head moving up lands on the tail cell
        let snake = Snake::from_segments(
            cells(&[(5, 6), (6, 6), (6, 5), (5, 5)]),
            Direction::Up,
        );
        assert_eq!(snake.next_head(), snake.tail());
        assert_eq!(snake.advance(&grid, false), Err(CollisionKind::SelfCollision));
    }

    #[test]
    fn test_steer_ignores_reversal() {
        let mut snake = Snake::from_segments(cells(&[(6, 5), (5, 5)]), Direction::Right);
        snake.steer(Direction::Left);
        assert_eq!(snake.direction, Direction::Right);
        snake.steer(Direction::Up);
        assert_eq!(snake.direction, Direction::Up);
    }
}
