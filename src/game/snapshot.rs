//! Read-only view of a round handed to the renderer once per frame

use serde::Serialize;

use super::direction::Direction;
use super::grid::Cell;
use super::item::Category;
use super::state::{CollisionKind, RoundState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub position: Cell,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Segments, head first
    pub segments: Vec<Cell>,
    /// Direction the head sprite faces
    pub head_orientation: Direction,
    pub item: ItemView,
    pub score: i32,
    pub tick_rate: u32,
    pub alive: bool,
    pub collision: Option<CollisionKind>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.segments.first().copied()
    }
}

impl RoundState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.body.clone(),
            head_orientation: self.snake.direction,
            item: ItemView {
                position: self.item.position,
                category: self.item.category,
            },
            score: self.score,
            tick_rate: self.tick_rate,
            alive: self.is_alive,
            collision: self.collision,
        }
    }
}
