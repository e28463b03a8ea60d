use std::time::{Duration, Instant};

/// Round clock and best-score bookkeeping for the front end
pub struct GameMetrics {
    round_started: Instant,
    pub round_time: Duration,
    /// Best final score so far. Scores can be negative, so there is no
    /// meaningful zero before the first round ends.
    pub high_score: Option<i32>,
    pub rounds_played: u32,
    /// Whether the last finished round set the high score
    pub last_was_best: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            round_time: Duration::ZERO,
            high_score: None,
            rounds_played: 0,
            last_was_best: false,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance the round clock to `now`
    pub fn update_at(&mut self, now: Instant) {
        self.round_time = now.saturating_duration_since(self.round_started);
    }

    pub fn on_round_start(&mut self) {
        self.start_round_at(Instant::now());
    }

    pub fn start_round_at(&mut self, now: Instant) {
        self.round_started = now;
        self.round_time = Duration::ZERO;
        self.last_was_best = false;
    }

    /// Record a finished round; returns true when it beat the high score
    pub fn on_round_over(&mut self, final_score: i32) -> bool {
        self.rounds_played += 1;
        self.last_was_best = match self.high_score {
            Some(best) => final_score > best,
            None => true,
        };
        if self.last_was_best {
            self.high_score = Some(final_score);
        }
        self.last_was_best
    }

    /// Round time as `mm:ss`
    pub fn round_time_text(&self) -> String {
        let secs = self.round_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn high_score_text(&self) -> String {
        match self.high_score {
            Some(score) => score.to_string(),
            None => "-".to_string(),
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
