use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Category, Cell, CollisionKind, Direction, Grid, Screen, Snapshot};
use crate::metrics::GameMetrics;

/// Draws whatever screen the session is on.
///
/// Only ever sees [`Snapshot`]s, never the live round.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        screen: Screen,
        grid: &Grid,
        snapshot: Option<&Snapshot>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match (screen, snapshot) {
            (Screen::Playing, Some(snapshot)) => {
                let stats = self.render_status_bar(chunks[0], snapshot, metrics);
                frame.render_widget(stats, chunks[0]);
                let playfield = self.render_grid(game_area, grid, snapshot);
                frame.render_widget(playfield, game_area);
            }
            (Screen::Ended { final_score }, _) => {
                let end = self.render_game_over(game_area, final_score, snapshot, metrics);
                frame.render_widget(end, game_area);
            }
            _ => {
                let menu = self.render_menu(game_area, metrics);
                frame.render_widget(menu, game_area);
            }
        }

        let controls = self.render_controls(chunks[2], screen);
        frame.render_widget(controls, chunks[2]);
    }

    /// Glyph and style for a spawned critter
    pub fn item_glyph(category: Category) -> (&'static str, Style) {
        match category {
            Category::Small => ("m ", Style::default().fg(Color::Gray)),
            Category::Medium => ("r ", Style::default().fg(Color::Yellow)),
            Category::Large => (
                "G ",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Category::Hazard => (
                "D ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        }
    }

    /// Head glyph pointing the way the snake is heading
    pub fn head_glyph(orientation: Direction) -> &'static str {
        match orientation {
            Direction::Up => "▲ ",
            Direction::Down => "▼ ",
            Direction::Left => "◀ ",
            Direction::Right => "▶ ",
        }
    }

    fn render_grid(&self, _area: Rect, grid: &Grid, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let head = snapshot.head();

        for row in Grid::FIRST_ROW..grid.rows {
            let mut spans = Vec::new();

            for col in 0..grid.columns {
                let cell = Cell::new(col, row);

                let span = if Some(cell) == head {
                    Span::styled(
                        Self::head_glyph(snapshot.head_orientation),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.segments.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == snapshot.item.position {
                    let (glyph, style) = Self::item_glyph(snapshot.item.category);
                    Span::styled(glyph, style)
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Don't eat the dog! "),
            )
            .alignment(Alignment::Center)
    }

    fn render_status_bar(
        &self,
        _area: Rect,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.tick_rate.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.round_time_text(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score_text(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, _area: Rect, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Eat the mice (m), rats (r) and guinea pigs (G)."),
            Line::from(vec![
                Span::raw("Careful: "),
                Span::styled(
                    "don't eat the dog (D)",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play", Style::default().fg(Color::Gray)),
            ]),
        ];

        if metrics.rounds_played > 0 {
            text.push(Line::from(""));
            text.push(Line::from(format!(
                "Best score: {}",
                metrics.high_score_text()
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(
        &self,
        _area: Rect,
        final_score: i32,
        snapshot: Option<&Snapshot>,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let reason = match snapshot.map(|s| s.collision) {
            Some(Some(CollisionKind::OutOfBounds)) => "You hit the wall",
            Some(Some(CollisionKind::SelfCollision)) => "You bit yourself",
            // Ended without a collision: nowhere left to put a critter
            Some(None) => "The board is full",
            None => "",
        };

        let mut best_line = vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score_text(), Style::default().fg(Color::White)),
        ];
        if metrics.last_was_best {
            best_line.push(Span::styled(
                "  New best!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(best_line),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for a new game or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect, screen: Screen) -> Paragraph<'_> {
        let hint = match screen {
            Screen::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Screen::Menu | Screen::Ended { .. } => vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to play | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(Line::from(hint)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
