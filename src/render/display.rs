use crate::controller::Presentation;
use crate::game::{Cell, Position};

/// In-memory screen model. The controller paints into it and the
/// [`Renderer`](super::Renderer) draws it each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    score: u32,
    time_secs: f64,
    rate: f64,
    game_over: bool,
}

impl Display {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            score: 0,
            time_secs: 0.0,
            rate: 0.0,
            game_over: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let in_bounds = pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.col >= 0
            && (pos.col as usize) < self.cols;
        in_bounds.then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.index(pos).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Number of painted cells of the given kind
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    pub fn game_over_shown(&self) -> bool {
        self.game_over
    }

    pub fn format_time(&self) -> String {
        format!("{:.2}", self.time_secs)
    }

    pub fn format_rate(&self) -> String {
        format!("{:.2}", self.rate)
    }
}

impl Presentation for Display {
    fn paint_cell(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    fn set_score_display(&mut self, score: u32) {
        self.score = score;
    }

    fn set_time_display(&mut self, seconds: f64) {
        self.time_secs = seconds;
    }

    fn set_rate_display(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn show_game_over(&mut self) {
        self.game_over = true;
    }

    fn clear_game_over(&mut self) {
        self.game_over = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_and_read_back() {
        let mut display = Display::new(4, 5);
        display.paint_cell(Position::new(3, 4), Cell::SnakeHead);
        display.paint_cell(Position::new(4, 0), Cell::Food);

        assert_eq!(display.cell(Position::new(3, 4)), Cell::SnakeHead);
        assert_eq!(display.cell(Position::new(4, 0)), Cell::Empty);
        assert_eq!(display.count(Cell::Food), 0);
    }

    #[test]
    fn test_labels() {
        let mut display = Display::new(2, 2);
        display.set_score_display(7);
        display.set_time_display(12.5);
        display.set_rate_display(0.56);
        display.show_game_over();

        assert_eq!(display.score(), 7);
        assert_eq!(display.format_time(), "12.50");
        assert_eq!(display.format_rate(), "0.56");
        assert!(display.game_over_shown());

        display.clear_game_over();
        assert!(!display.game_over_shown());
    }
}
