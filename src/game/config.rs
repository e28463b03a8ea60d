use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::grid::Cell;

/// Configuration for the game
///
/// Dimensions are kept in pixels and a block size; the grid is derived
/// from them. Row 0 of the grid is the status bar and is never playable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in pixels
    pub playfield_width: u32,
    /// Height of the playfield in pixels, status bar included
    pub playfield_height: u32,
    /// Edge length of one cell in pixels
    pub block_size: u32,
    /// Cell the one-segment snake starts on
    pub start_cell: Cell,

    // Speed curve
    /// Ticks per second at the start of a round
    pub base_tick_rate: u32,
    /// Upper clamp for the tick rate
    pub max_tick_rate: u32,
    /// Score needed for each extra tick per second
    pub points_per_speed_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: 960,
            playfield_height: 640,
            block_size: 64,
            start_cell: Cell::new(5, 5),
            base_tick_rate: 4,
            max_tick_rate: 10,
            points_per_speed_step: 3,
        }
    }
}

impl GameConfig {
    /// Largest accepted grid side in cells
    pub const MAX_GRID_SIDE: i32 = 1024;

    /// Create a new configuration with a custom grid size in cells.
    ///
    /// `rows` includes the status bar row. Sizes too large for the pixel
    /// fields saturate and are then rejected by `validate`.
    pub fn new(columns: u32, rows: u32) -> Self {
        let defaults = Self::default();
        Self {
            playfield_width: columns.saturating_mul(defaults.block_size),
            playfield_height: rows.saturating_mul(defaults.block_size),
            ..defaults
        }
    }

    /// Resize the playfield to `columns` cells at the current block size
    pub fn set_columns(&mut self, columns: u32) -> Result<()> {
        self.playfield_width = columns
            .checked_mul(self.block_size)
            .with_context(|| format!("{} columns of {} px overflow", columns, self.block_size))?;
        Ok(())
    }

    /// Resize the playfield to `rows` cells at the current block size
    pub fn set_rows(&mut self, rows: u32) -> Result<()> {
        self.playfield_height = rows
            .checked_mul(self.block_size)
            .with_context(|| format!("{} rows of {} px overflow", rows, self.block_size))?;
        Ok(())
    }

    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        Self::cells(self.playfield_width, self.block_size)
    }

    /// Number of grid rows, status bar included
    pub fn rows(&self) -> i32 {
        Self::cells(self.playfield_height, self.block_size)
    }

    fn cells(pixels: u32, block_size: u32) -> i32 {
        i32::try_from(pixels / block_size.max(1)).unwrap_or(i32::MAX)
    }

    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    ///
    /// The spawn area is the playable rectangle shrunk by one cell on every
    /// edge, so at least 5 columns and 5 rows are needed for it to be
    /// non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            bail!("block_size must be positive");
        }
        if self.columns() < 5 || self.rows() < 5 {
            bail!(
                "grid of {}x{} cells is too small, need at least 5x5",
                self.columns(),
                self.rows()
            );
        }
        if self.columns() > Self::MAX_GRID_SIDE || self.rows() > Self::MAX_GRID_SIDE {
            bail!(
                "grid of {}x{} cells is too large, at most {} per side",
                self.columns(),
                self.rows(),
                Self::MAX_GRID_SIDE
            );
        }
        let start = self.start_cell;
        let col_ok = start.col >= 0 && start.col < self.columns();
        let row_ok = start.row >= 1 && start.row < self.rows();
        if !col_ok || !row_ok {
            bail!("start cell {:?} is outside the playable area", start);
        }
        if self.base_tick_rate == 0 {
            bail!("base_tick_rate must be positive");
        }
        if self.max_tick_rate < self.base_tick_rate {
            bail!(
                "max_tick_rate ({}) is below base_tick_rate ({})",
                self.max_tick_rate,
                self.base_tick_rate
            );
        }
        if self.points_per_speed_step == 0 {
            bail!("points_per_speed_step must be positive");
        }
        Ok(())
    }
}
