use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::debug;

use crate::game::{GameEngine, Screen, Session, Trigger};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            session: Session::new(engine),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at the round's tick rate
        let mut tick_period = self.session.tick_interval();
        let mut tick_timer = interval(tick_period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.session.screen() == Screen::Playing {
                        self.metrics.update();
                    }
                    let screen = self.session.screen();
                    let snapshot = self.session.snapshot();
                    let grid = *self.session.engine().grid();
                    terminal.draw(|frame| {
                        let snapshot = snapshot.as_ref();
                        self.renderer.render(frame, screen, &grid, snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.session.trigger(Trigger::Quit)?;
                }
            }

            if self.session.should_quit() {
                break;
            }

            let period = self.session.tick_interval();
            if period != tick_period {
                debug!(?period, "tick period changed");
                tick_period = period;
                tick_timer = Self::restart_timer(period);
            }
        }

        Ok(())
    }

    fn restart_timer(period: Duration) -> Interval {
        interval_at(Instant::now() + period, period)
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.session.queue_intent(direction);
                }
                KeyAction::None => {}
                action => {
                    for trigger in action.triggers() {
                        self.apply_trigger(*trigger)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn apply_trigger(&mut self, trigger: Trigger) -> Result<()> {
        let was_playing = self.session.screen() == Screen::Playing;
        self.session
            .trigger(trigger)
            .context("Failed to start a new round")?;
        if !was_playing && self.session.screen() == Screen::Playing {
            self.metrics.on_round_start();
        }
        Ok(())
    }

    fn update_game(&mut self) {
        let outcome = self.session.tick();

        // Track round over
        if let (Some(outcome), Screen::Ended { final_score }) = (outcome, self.session.screen()) {
            if outcome.terminated {
                if self.metrics.on_round_over(final_score) {
                    debug!(final_score, "new high score");
                }
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
