use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, Position, RoundState, TerminationCause};
use crate::metrics::GameMetrics;

/// Which screen the frame loop is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
}

pub struct Renderer {
    frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        screen: Screen,
        state: &RoundState,
        metrics: &GameMetrics,
    ) {
        self.frames = self.frames.wrapping_add(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match screen {
            Screen::Title => frame.render_widget(self.render_title(), board_area),
            Screen::Playing => frame.render_widget(self.render_grid(state), board_area),
            Screen::GameOver => frame.render_widget(self.render_game_over(state), board_area),
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &RoundState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid.height);
        let head = state.worm.head();
        let food = state.food.position();

        for y in 0..state.grid.height {
            let mut spans = Vec::with_capacity(state.grid.width);

            for x in 0..state.grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.worm.occupies(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if pos == food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if state.obstacles.contains(pos) {
                    Span::styled("▲ ", Style::default().fg(Color::Rgb(255, 128, 0)))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Wormy "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &RoundState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}/s", state.tick_rate), value),
            Span::raw("    "),
            Span::styled("Rocks: ", label),
            Span::styled(state.obstacles.count().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Eaten: ", label),
            Span::styled(metrics.food_eaten.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_title(&self) -> Paragraph<'_> {
        // Alternate the two title colours every half second or so
        let (fg, bg) = if (self.frames / 15) % 2 == 0 {
            (Color::White, Color::Green)
        } else {
            (Color::LightGreen, Color::Reset)
        };

        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                " Wormy! ",
                Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press a key to play.",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_game_over(&self, state: &RoundState) -> Paragraph<'_> {
        let reason = match state.termination() {
            Some(TerminationCause::Collision(CollisionType::Wall)) => "Hit the wall",
            Some(TerminationCause::Collision(CollisionType::SelfCollision)) => "Bit yourself",
            Some(TerminationCause::Collision(CollisionType::Obstacle)) => "Hit a rock",
            Some(TerminationCause::PlacementExhausted) => "No room left on the board",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press a key to play again, Q to quit",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
