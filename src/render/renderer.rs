use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::display::Display;
use crate::controller::{ControllerStatus, Lifecycle};
use crate::game::{Cell, Position};

const SCORE_PANEL_WIDTH: u16 = 26;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, display: &Display, status: &ControllerStatus) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(status), chunks[0]);

        // Grid on the left, score panel on the right
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(display.cols() as u16 * 2 + 2),
                Constraint::Length(SCORE_PANEL_WIDTH),
                Constraint::Min(0),
            ])
            .split(chunks[1]);

        frame.render_widget(self.render_grid(display), body[0]);
        frame.render_widget(self.render_score_panel(display), body[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, display: &Display) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(display.rows());

        for row in 0..display.rows() {
            let spans: Vec<Span> = (0..display.cols())
                .map(|col| cell_span(display.cell(Position::new(row as i32, col as i32))))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Greedy Snake "),
        )
    }

    fn render_score_panel(&self, display: &Display) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Points: ", label),
                Span::styled(display.score().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Time: ", label),
                Span::styled(display.format_time(), value),
            ]),
            Line::from(vec![
                Span::styled("Points per sec: ", label),
                Span::styled(display.format_rate(), value),
            ]),
        ];

        if display.game_over_shown() {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                "Game over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Score "),
        )
    }

    fn render_header(&self, status: &ControllerStatus) -> Paragraph<'_> {
        let (state, color) = match status.lifecycle {
            Lifecycle::Stopped => ("STOPPED", Color::Gray),
            Lifecycle::Running => ("RUNNING", Color::Green),
            Lifecycle::Paused => ("PAUSED", Color::Yellow),
            Lifecycle::GameOver => ("GAME OVER", Color::Red),
        };
        let wrap = if status.wraparound { "on" } else { "off" };

        let text = vec![Line::from(vec![
            Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(status.step_rate.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Wraparound: ", Style::default().fg(Color::Yellow)),
            Span::styled(wrap, Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                status.stats.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                status.stats.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→/WASD", key),
            Span::raw(" move | "),
            Span::styled("Enter", key),
            Span::raw(" start | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("R", key),
            Span::raw(" reset | "),
            Span::styled("T", key),
            Span::raw(" wraparound | "),
            Span::styled("1-0 +/-", key),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::SnakeHead => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::SnakeBody => Span::styled("■ ", Style::default().fg(Color::Blue)),
        Cell::Food => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}
