//! Menu / playing / end-screen flow around the round controller
//!
//! A new round is started by a transition out of `Ended`, never by
//! re-entering the game loop, so any number of replays runs in constant
//! stack depth.

use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::info;

use super::{
    direction::Direction,
    engine::{GameEngine, TickOutcome},
    item::SpawnError,
    snapshot::Snapshot,
    state::RoundState,
};

/// Which screen the front end should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Ended { final_score: i32 },
}

/// External triggers that move the session between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Restart,
    Quit,
}

pub struct Session<R = StdRng> {
    engine: GameEngine<R>,
    screen: Screen,
    round: Option<RoundState>,
    /// Latest intent since the last tick; older ones are overwritten
    pending_intent: Option<Direction>,
    should_quit: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        Self {
            engine,
            screen: Screen::Menu,
            round: None,
            pending_intent: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Snapshot of the current (or last finished) round
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.round.as_ref().map(RoundState::snapshot)
    }

    /// Apply a trigger. Triggers that make no sense on the current screen
    /// are ignored.
    pub fn trigger(&mut self, trigger: Trigger) -> Result<(), SpawnError> {
        match (self.screen, trigger) {
            (_, Trigger::Quit) => {
                self.should_quit = true;
            }
            (Screen::Menu, Trigger::Start) | (Screen::Ended { .. }, Trigger::Restart) => {
                self.start_round()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Buffer a direction for the next tick
    pub fn queue_intent(&mut self, direction: Direction) {
        if self.screen == Screen::Playing {
            self.pending_intent = Some(direction);
        }
    }

    /// Advance the live round by one tick. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let round = self.round.as_mut()?;
        if self.screen != Screen::Playing {
            return None;
        }

        let intent = self.pending_intent.take();
        let outcome = self.engine.tick(round, intent);

        if outcome.terminated {
            info!(final_score = round.score, "showing end screen");
            self.screen = Screen::Ended {
                final_score: round.score,
            };
        }
        Some(outcome)
    }

    /// Time between ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        let rate = self
            .round
            .as_ref()
            .map(|round| round.tick_rate)
            .unwrap_or(self.engine.config().base_tick_rate)
            .max(1);
        Duration::from_millis(1000 / rate as u64)
    }

    fn start_round(&mut self) -> Result<(), SpawnError> {
        self.round = Some(self.engine.reset()?);
        self.pending_intent = None;
        self.screen = Screen::Playing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Category, Cell, GameConfig, Item, Snake};

    fn session() -> Session {
        Session::new(GameEngine::with_seed(GameConfig::default(), 5))
    }

    /// Put the item somewhere the snake won't reach during a test
    fn park_item(session: &mut Session) {
        if let Some(round) = session.round.as_mut() {
            round.item = Item::new(Cell::new(1, 8), Category::Small);
        }
    }

    #[test]
    fn test_starts_on_menu() {
        let mut session = session();
        assert_eq!(session.screen(), Screen::Menu);
        assert!(session.round().is_none());
        assert_eq!(session.tick(), None);
        assert_eq!(session.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_start_begins_round() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();

        assert_eq!(session.screen(), Screen::Playing);
        let round = session.round().unwrap();
        assert!(round.is_alive);
        assert_eq!(round.snake.head(), Cell::new(5, 5));
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();
        park_item(&mut session);
        session.tick();

        session.trigger(Trigger::Restart).unwrap();
        session.trigger(Trigger::Start).unwrap();

        assert_eq!(session.round().unwrap().snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_round_end_moves_to_end_screen() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();
        park_item(&mut session);

        // From (5,5) heading right the wall at column 15 is 10 moves away
        let mut ticks = 0;
        while session.screen() == Screen::Playing {
            session.tick();
            ticks += 1;
            assert!(ticks <= 10);
        }

        assert_eq!(session.screen(), Screen::Ended { final_score: 0 });
        assert!(!session.snapshot().unwrap().alive);
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn test_restart_after_end_many_times() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();

        for _ in 0..50 {
            park_item(&mut session);
            if let Some(round) = session.round.as_mut() {
                round.snake.direction = Direction::Up;
            }
            while session.screen() == Screen::Playing {
                session.tick();
            }
            session.trigger(Trigger::Restart).unwrap();
            assert_eq!(session.screen(), Screen::Playing);
            assert_eq!(session.round().unwrap().score, 0);
        }
    }

    #[test]
    fn test_intents_coalesce_to_latest() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();
        park_item(&mut session);

        session.queue_intent(Direction::Up);
        session.queue_intent(Direction::Down);
        session.tick();

        let round = session.round().unwrap();
        assert_eq!(round.snake.direction, Direction::Down);
        assert_eq!(round.snake.head(), Cell::new(5, 6));

        // Buffer is drained by the tick
        session.tick();
        assert_eq!(session.round().unwrap().snake.head(), Cell::new(5, 7));
    }

    #[test]
    fn test_intents_ignored_outside_playing() {
        let mut session = session();
        session.queue_intent(Direction::Down);
        session.trigger(Trigger::Start).unwrap();
        park_item(&mut session);
        session.tick();

        assert_eq!(session.round().unwrap().snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut session = session();
        session.trigger(Trigger::Quit).unwrap();
        assert!(session.should_quit());

        let mut session = self::session();
        session.trigger(Trigger::Start).unwrap();
        session.trigger(Trigger::Quit).unwrap();
        assert!(session.should_quit());
    }

    #[test]
    fn test_tick_interval_follows_speed() {
        let mut session = session();
        session.trigger(Trigger::Start).unwrap();
        if let Some(round) = session.round.as_mut() {
            round.tick_rate = 10;
        }
        assert_eq!(session.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_full_board_ends_round_not_session() {
        let config = GameConfig {
            start_cell: Cell::new(2, 3),
            ..GameConfig::new(5, 5)
        };
        let mut session = Session::new(GameEngine::with_seed(config, 5));
        session.trigger(Trigger::Start).unwrap();

        // Eating the item at (3,3) would cover the whole 3x2 spawn area
        if let Some(round) = session.round.as_mut() {
            round.snake = Snake::from_segments(
                vec![
                    Cell::new(2, 3),
                    Cell::new(1, 3),
                    Cell::new(1, 2),
                    Cell::new(2, 2),
                    Cell::new(3, 2),
                ],
                Direction::Right,
            );
            round.item = Item::new(Cell::new(3, 3), Category::Medium);
        }

        let outcome = session.tick().unwrap();

        assert!(outcome.terminated);
        assert!(outcome.board_full);
        assert_eq!(session.screen(), Screen::Ended { final_score: 0 });
        assert!(!session.should_quit());

        // A fresh round can still be played afterwards
        session.trigger(Trigger::Restart).unwrap();
        assert_eq!(session.screen(), Screen::Playing);
        assert!(session.round().unwrap().is_alive);
    }
}
