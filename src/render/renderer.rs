use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Cell, GameState, Rgb, RivalRoster, RoundState};
use crate::score::HighScores;

/// Pure view over the simulation state. Reads the snapshot, produces
/// widgets, never mutates anything.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        roster: &RivalRoster,
        scores: &HighScores,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.round == RoundState::GameOver {
            let game_over = self.render_game_over(game_area, state, scores);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state, roster);
            frame.render_widget(grid, game_area);
        }

        let footer = self.render_footer(chunks[2], scores);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState, roster: &RivalRoster) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Cell::new(x as i32, y as i32);
                spans.push(self.cell_span(pos, state, roster));
            }

            lines.push(Line::from(spans));
        }

        let title = if state.round == RoundState::Paused {
            " PAUSED "
        } else {
            " Snake Arena "
        };
        let border_color = if state.round == RoundState::Paused {
            Color::Yellow
        } else {
            Color::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn cell_span(&self, pos: Cell, state: &GameState, roster: &RivalRoster) -> Span<'static> {
        if pos == state.player.head() {
            return Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if state.player.snake.contains(pos) {
            return Span::styled("□ ", Style::default().fg(Color::Green));
        }

        for rival in &state.rivals {
            let color = roster
                .get(rival.id)
                .map(|identity| to_color(identity.color))
                .unwrap_or(Color::Gray);
            if pos == rival.head() {
                let glyph = roster
                    .get(rival.id)
                    .map(|identity| format!("{} ", identity.head_glyph))
                    .unwrap_or_else(|| "◆ ".to_string());
                return Span::styled(
                    glyph,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
            if rival.snake.contains(pos) {
                return Span::styled("● ", Style::default().fg(color));
            }
        }

        if pos == state.food.primary {
            return Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }
        if state.food.bonus.contains(&pos) {
            return Span::styled("o ", Style::default().fg(Color::LightRed));
        }

        Span::styled(". ", Style::default().fg(Color::DarkGray))
    }

    fn render_stats(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("L{}", state.difficulty.speed_level),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Rivals: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.rivals.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(format_time(state.elapsed_secs), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        scores: &HighScores,
    ) -> Paragraph<'_> {
        let top_score = scores.best().unwrap_or(state.score).max(state.score);
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
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
            Line::from(vec![
                Span::styled("Top Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(top_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
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

    fn render_footer(&self, _area: Rect, scores: &HighScores) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ];

        if !scores.top().is_empty() {
            spans.push(Span::raw("    Best: "));
            let rendered: Vec<String> = scores
                .top()
                .iter()
                .enumerate()
                .map(|(i, s)| format!("#{} {}", i + 1, s))
                .collect();
            spans.push(Span::styled(
                rendered.join("  "),
                Style::default().fg(Color::White),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn format_time(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(3661), "61:01");
    }

    #[test]
    fn test_rgb_to_terminal_color() {
        assert_eq!(to_color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
