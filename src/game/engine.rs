use super::{
    config::GameConfig,
    direction::Direction,
    grid::Grid,
    item::{Category, ItemSpawner, SpawnError},
    state::{CollisionKind, RoundState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Category of the item eaten this tick, if any
    pub eaten: Option<Category>,
    /// Type of collision if one occurred
    pub collision: Option<CollisionKind>,
    /// The round ended because no cell was left for the next item
    pub board_full: bool,
    /// Whether the round is over
    pub terminated: bool,
}

impl TickOutcome {
    fn finished() -> Self {
        Self {
            eaten: None,
            collision: None,
            board_full: false,
            terminated: true,
        }
    }
}

/// Tick rate for a given score.
///
/// Negative scores count as zero, so the rate never drops below the base.
pub fn tick_rate_for_score(config: &GameConfig, score: i32) -> u32 {
    let steps = score.max(0) as u32 / config.points_per_speed_step.max(1);
    config
        .max_tick_rate
        .min(config.base_tick_rate.saturating_add(steps))
}

/// The round controller: owns the rules and the RNG, advances a
/// [`RoundState`] one tick at a time.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    spawner: ItemSpawner,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose item placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let grid = Grid::from_config(&config);
        Self {
            config,
            grid,
            spawner: ItemSpawner::new(grid),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Start a fresh round
    pub fn reset(&mut self) -> Result<RoundState, SpawnError> {
        let snake = Snake::new(self.config.start_cell, Direction::default());
        let item = self.spawner.spawn(&mut self.rng, &snake.cells())?;

        info!(start = ?self.config.start_cell, "round started");
        Ok(RoundState::new(snake, item, self.config.base_tick_rate))
    }

    /// Execute one tick of the round with at most one direction intent.
    ///
    /// Nothing is committed until the move is known to be legal and, when
    /// the item is eaten, its replacement has been placed. If no free cell
    /// is left for the replacement the round ends with snake, score and
    /// item as they were before the tick.
    pub fn tick(&mut self, state: &mut RoundState, intent: Option<Direction>) -> TickOutcome {
        if !state.is_alive {
            return TickOutcome::finished();
        }

        if let Some(requested) = intent {
            state.snake.steer(requested);
        }

        let grow = state.snake.next_head() == state.item.position;

        let snake = match state.snake.advance(&self.grid, grow) {
            Ok(snake) => snake,
            Err(kind) => {
                state.is_alive = false;
                state.collision = Some(kind);
                info!(
                    score = state.score,
                    ticks = state.ticks,
                    length = state.snake.len(),
                    "round ended: {}",
                    kind
                );
                return TickOutcome {
                    collision: Some(kind),
                    ..TickOutcome::finished()
                };
            }
        };

        let replacement = if grow {
            match self.spawner.spawn(&mut self.rng, &snake.cells()) {
                Ok(item) => Some(item),
                Err(err) => {
                    state.is_alive = false;
                    warn!(score = state.score, length = snake.len(), "round ended: {}", err);
                    return TickOutcome {
                        board_full: true,
                        ..TickOutcome::finished()
                    };
                }
            }
        } else {
            None
        };

        state.snake = snake;
        state.ticks += 1;

        let mut eaten = None;
        if let Some(item) = replacement {
            let category = state.item.category;
            state.score += state.item.point_value();
            state.item = item;

            let tick_rate = tick_rate_for_score(&self.config, state.score);
            if tick_rate != state.tick_rate {
                debug!(from = state.tick_rate, to = tick_rate, "speed changed");
            }
            state.tick_rate = tick_rate;

            debug!(
                ?category,
                score = state.score,
                length = state.snake.len(),
                "item eaten"
            );
            eaten = Some(category);
        }

        TickOutcome {
            eaten,
            collision: None,
            board_full: false,
            terminated: false,
        }
    }
}
