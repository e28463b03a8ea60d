//! Core game logic module
//!
//! This module contains all the game rules without any I/O or rendering
//! dependencies. The terminal front end drives it through [`Session`] and
//! draws [`Snapshot`]s; tests drive it headlessly with a seeded RNG.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod item;
pub mod session;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome, tick_rate_for_score};
pub use grid::{Cell, Grid};
pub use item::{Category, Item, ItemSpawner, SpawnError};
pub use session::{Screen, Session, Trigger};
pub use snapshot::{ItemView, Snapshot};
pub use state::{CollisionKind, RoundState, Snake};
