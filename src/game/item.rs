//! Spawnable critters and the weighted spawner

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

use super::grid::{Cell, Grid};

/// Kind of spawned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A mouse
    Small,
    /// A rat
    Medium,
    /// A guinea pig
    Large,
    /// The dog. Don't eat the dog.
    Hazard,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Small,
        Category::Medium,
        Category::Large,
        Category::Hazard,
    ];

    /// Score change when eaten
    pub fn points(&self) -> i32 {
        match self {
            Category::Small => 1,
            Category::Medium => 2,
            Category::Large => 3,
            Category::Hazard => -2,
        }
    }

    /// Relative spawn weight out of [`TOTAL_WEIGHT`]
    pub fn weight(&self) -> u32 {
        match self {
            Category::Small => 50,
            Category::Medium => 30,
            Category::Large => 15,
            Category::Hazard => 5,
        }
    }
}

/// Sum of all category weights
pub const TOTAL_WEIGHT: u32 = 100;

/// Cumulative upper bounds for a roll in `0..TOTAL_WEIGHT`
const CUMULATIVE_WEIGHTS: [(u32, Category); 4] = [
    (50, Category::Small),
    (80, Category::Medium),
    (95, Category::Large),
    (100, Category::Hazard),
];

/// The single item on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub position: Cell,
    pub category: Category,
}

impl Item {
    pub fn new(position: Cell, category: Category) -> Self {
        Self { position, category }
    }

    pub fn point_value(&self) -> i32 {
        self.category.points()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left to spawn an item on")]
    NoFreeCell,
}

/// Places new items on free cells.
///
/// Holds no state of its own besides the grid; randomness comes from the
/// caller so engines can run with a seeded RNG.
#[derive(Debug, Clone, Copy)]
pub struct ItemSpawner {
    grid: Grid,
}

impl ItemSpawner {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Spawn an item on a cell not in `occupied`
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
    ) -> Result<Item, SpawnError> {
        let position = self.grid.random_free_cell(rng, occupied).ok_or_else(|| {
            warn!(occupied = occupied.len(), "spawn area exhausted");
            SpawnError::NoFreeCell
        })?;
        let category = Self::draw_category(rng);
        Ok(Item::new(position, category))
    }

    /// One bounded draw against the cumulative weight table
    pub fn draw_category<R: Rng>(rng: &mut R) -> Category {
        Self::category_for_roll(rng.gen_range(0..TOTAL_WEIGHT))
    }

    fn category_for_roll(roll: u32) -> Category {
        CUMULATIVE_WEIGHTS
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, category)| *category)
            .unwrap_or(Category::Hazard)
    }
}
