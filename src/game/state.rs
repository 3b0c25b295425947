use std::time::Duration;

use super::action::Direction;

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Food,
    SnakeBody,
    SnakeHead,
}

/// A position on the game grid, zero-indexed from the top-left corner.
///
/// Coordinates are signed because a freshly advanced head may sit one cell
/// outside the grid until boundary resolution runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        self.moved_by(drow, dcol)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a single-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Number of segments equal to `pos`, head included
    pub fn occurrences(&self, pos: Position) -> usize {
        self.body.iter().filter(|&&p| p == pos).count()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Fixed-size `rows x cols` grid of cells. This is the render source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.row < self.rows as i32
            && pos.col >= 0
            && pos.col < self.cols as i32
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    /// Cell at `pos`, or `None` when it lies outside the grid
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `pos`. Off-grid writes are dropped.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All cells in row-major order with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            (Position::new((i / cols) as i32, (i % cols) as i32), cell)
        })
    }

    /// Positions of every empty cell
    pub fn empty_cells(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| *cell == Cell::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score and active play time.
///
/// Time is sampled at tick boundaries. Any time spent paused since the last
/// tick is carried as pause debt and subtracted on the next tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameClock {
    /// Active play time in seconds, rounded to 2 decimals
    pub elapsed_secs: f64,
    pub score: u32,
    /// Points per second of active play, rounded to 2 decimals
    pub score_rate: f64,
    last_tick: Duration,
    pause_debt: Duration,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring from `now`
    pub fn begin(&mut self, now: Duration) {
        self.last_tick = now;
        self.pause_debt = Duration::ZERO;
    }

    /// Exclude `paused` from the next tick's delta
    pub fn add_pause(&mut self, paused: Duration) {
        self.pause_debt += paused;
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Fold the time since the last tick into the elapsed total and
    /// recompute the score rate
    pub fn tick(&mut self, now: Duration) {
        let delta =
            now.saturating_sub(self.last_tick).as_secs_f64() - self.pause_debt.as_secs_f64();
        self.elapsed_secs = round2((self.elapsed_secs + delta).max(0.0));
        self.pause_debt = Duration::ZERO;
        self.last_tick = now;
        self.score_rate = if self.elapsed_secs > 0.0 {
            round2(f64::from(self.score) / self.elapsed_secs)
        } else {
            0.0
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_in_direction(Direction::North), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::South), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::West), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::East), Position::new(5, 6));
    }

    #[test]
    fn test_snake_occurrences() {
        let snake = Snake {
            body: vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(1, 1),
            ],
        };
        assert_eq!(snake.occurrences(Position::new(1, 1)), 2);
        assert_eq!(snake.occurrences(Position::new(1, 2)), 1);
        assert_eq!(snake.occurrences(Position::new(9, 9)), 0);
        assert_eq!(snake.tail(), Position::new(1, 1));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(20, 10);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 9)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 10)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn test_grid_set_and_get() {
        let mut grid = Grid::new(3, 4);
        grid.set_cell(Position::new(2, 3), Cell::Food);
        grid.set_cell(Position::new(3, 0), Cell::SnakeHead);

        assert_eq!(grid.cell_at(Position::new(2, 3)), Some(Cell::Food));
        assert_eq!(grid.cell_at(Position::new(0, 0)), Some(Cell::Empty));
        assert_eq!(grid.cell_at(Position::new(3, 0)), None);
        assert_eq!(grid.count(Cell::Food), 1);
        assert_eq!(grid.count(Cell::SnakeHead), 0);
        assert_eq!(grid.empty_cells().len(), 11);
    }

    #[test]
    fn test_grid_iter_is_row_major() {
        let grid = Grid::new(2, 3);
        let positions: Vec<_> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(0, 2));
        assert_eq!(positions[3], Position::new(1, 0));
        assert_eq!(positions.len(), 6);
    }

    #[test]
    fn test_clock_tick_rounds_and_rates() {
        let mut clock = GameClock::new();
        clock.begin(Duration::ZERO);
        clock.score = 3;

        clock.tick(Duration::from_millis(1234));
        assert_eq!(clock.elapsed_secs, 1.23);
        assert_eq!(clock.score_rate, 2.44);
    }

    #[test]
    fn test_clock_zero_elapsed_has_zero_rate() {
        let mut clock = GameClock::new();
        clock.begin(Duration::from_secs(5));
        clock.score = 4;

        clock.tick(Duration::from_secs(5));
        assert_eq!(clock.elapsed_secs, 0.0);
        assert_eq!(clock.score_rate, 0.0);
    }

    #[test]
    fn test_clock_excludes_pause_debt() {
        let mut clock = GameClock::new();
        clock.begin(Duration::ZERO);
        clock.add_pause(Duration::from_secs(3));

        clock.tick(Duration::from_secs(4));
        assert_eq!(clock.elapsed_secs, 1.0);

        // Debt is consumed by the tick that used it
        clock.tick(Duration::from_secs(5));
        assert_eq!(clock.elapsed_secs, 2.0);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = GameClock::new();
        clock.begin(Duration::ZERO);
        clock.add_point();
        clock.tick(Duration::from_secs(2));
        clock.reset();
        assert_eq!(clock, GameClock::default());
    }
}
