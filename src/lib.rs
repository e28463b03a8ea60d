//! Critter Snake - a terminal snake game
//!
//! This library provides:
//! - Core game rules, headless and deterministic under a seeded RNG (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering of round snapshots (render module)
//! - Per-process statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
