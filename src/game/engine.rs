use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{
    action::Direction,
    clock::{SystemClock, TimeSource},
    config::{ConfigError, GameConfig},
    state::{Cell, GameClock, Grid, Position, Snake},
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The head moved onto another body segment
    SelfCollision,
    /// The head left the grid with wraparound off
    Wall,
    /// The snake grew into the last free cell, leaving nowhere for food
    BoardFull,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set once the game has ended
    pub game_over: Option<GameOverReason>,
}

/// The simulation engine. Owns the grid and every entity on it.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    direction: Direction,
    food: Option<Position>,
    clock: GameClock,
    game_over: Option<GameOverReason>,
    rng: R,
    time: Box<dyn TimeSource>,
}

impl GameEngine<ThreadRng> {
    /// Create an engine driven by real time and a thread-local RNG
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_parts(config, rand::thread_rng(), Box::new(SystemClock::new()))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with an injected RNG and time source, then place
    /// the initial food and head
    pub fn with_parts(
        config: GameConfig,
        rng: R,
        time: Box<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            grid: Grid::new(config.rows, config.cols),
            config,
            snake: Snake::new(Position::new(0, 0)),
            direction: Direction::North,
            food: None,
            clock: GameClock::new(),
            game_over: None,
            rng,
            time,
        };
        engine.reset();
        Ok(engine)
    }

    /// Start a fresh game. Wraparound and step rate are kept.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.rows, self.config.cols);
        self.clock.reset();
        self.game_over = None;
        self.food = None;

        self.place_food();
        // A validated grid has at least four cells, so this always succeeds
        let head = self.place_head().unwrap_or(Position::new(0, 0));

        debug!(?head, food = ?self.food, direction = ?self.direction, "game reset");
    }

    /// Place food on a random empty cell of the current grid
    pub fn place_food(&mut self) -> Option<Position> {
        let pos = sample_empty(&self.grid, &mut self.rng)?;
        self.grid.set_cell(pos, Cell::Food);
        self.food = Some(pos);
        Some(pos)
    }

    /// Place a single-cell snake on a random empty cell and face it
    /// towards the most open side of the grid
    pub fn place_head(&mut self) -> Option<Position> {
        let pos = sample_empty(&self.grid, &mut self.rng)?;
        self.grid.set_cell(pos, Cell::SnakeHead);
        self.snake = Snake::new(pos);
        self.direction = Self::initial_direction(self.config.rows, self.config.cols, pos);
        Some(pos)
    }

    /// Facing for a freshly placed head, chosen by which quadrant (relative
    /// to the cutoff `n/2 - 1` on each axis) the head lies in
    pub fn initial_direction(rows: usize, cols: usize, head: Position) -> Direction {
        let row_cutoff = rows as f64 / 2.0 - 1.0;
        let col_cutoff = cols as f64 / 2.0 - 1.0;
        let (row, col) = (head.row, head.col);
        let (rows, cols) = (rows as i32, cols as i32);
        let far_row = f64::from(row) >= row_cutoff;
        let far_col = f64::from(col) >= col_cutoff;

        match (far_row, far_col) {
            (true, true) => {
                if row >= col {
                    Direction::North
                } else {
                    Direction::West
                }
            }
            (true, false) => {
                if cols - col >= row {
                    Direction::East
                } else {
                    Direction::North
                }
            }
            (false, true) => {
                if rows - row >= col {
                    Direction::South
                } else {
                    Direction::West
                }
            }
            (false, false) => {
                if row <= col {
                    Direction::South
                } else {
                    Direction::East
                }
            }
        }
    }

    /// Advance the game by one tick.
    ///
    /// Once the game is over this is a no-op that keeps reporting the
    /// reason. A step that ends the game leaves snake, food and grid as they
    /// were before it; only the clock moves.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.game_over {
            return StepOutcome {
                ate_food: false,
                game_over: Some(reason),
            };
        }

        self.clock.tick(self.time.now());

        let mut body = self.snake.body.clone();
        let advanced = body[0].moved_in_direction(self.direction);
        body.insert(0, advanced);
        body.pop();
        let mut snake = Snake { body };

        let head = match self.resolve_head(&snake) {
            Ok(head) => head,
            Err(reason) => {
                debug!(?advanced, ?reason, "step ended the game");
                self.game_over = Some(reason);
                return StepOutcome {
                    ate_food: false,
                    game_over: Some(reason),
                };
            }
        };
        snake.body[0] = head;

        let ate_food = self.food == Some(head);
        if ate_food {
            self.clock.add_point();
            self.grow(&mut snake);
        }

        let mut grid = Grid::new(self.config.rows, self.config.cols);
        if !ate_food {
            if let Some(food) = self.food {
                grid.set_cell(food, Cell::Food);
            }
        }
        for &segment in snake.body.iter().skip(1) {
            grid.set_cell(segment, Cell::SnakeBody);
        }
        grid.set_cell(head, Cell::SnakeHead);

        self.grid = grid;
        self.snake = snake;

        if ate_food {
            self.food = None;
            if self.place_food().is_none() {
                self.game_over = Some(GameOverReason::BoardFull);
            }
            debug!(score = self.clock.score, food = ?self.food, "food eaten");
        }

        StepOutcome {
            ate_food,
            game_over: self.game_over,
        }
    }

    /// Decide where the advanced head really ends up.
    ///
    /// Self-collision is checked before the boundary, and a wrapped head is
    /// not checked against the body again. Only one overflowing axis is
    /// corrected, which is enough for single-cell moves.
    fn resolve_head(&self, snake: &Snake) -> Result<Position, GameOverReason> {
        let head = snake.head();

        if snake.occurrences(head) > 1 {
            return Err(GameOverReason::SelfCollision);
        }
        if self.grid.in_bounds(head) {
            return Ok(head);
        }
        if !self.config.wraparound {
            return Err(GameOverReason::Wall);
        }

        let (rows, cols) = (self.config.rows as i32, self.config.cols as i32);
        let mut resolved = head;
        if head.row == rows {
            resolved.row = 0;
        } else if head.row == -1 {
            resolved.row = rows - 1;
        } else if head.col == cols {
            resolved.col = 0;
        } else if head.col == -1 {
            resolved.col = cols - 1;
        }
        Ok(resolved)
    }

    /// Append a segment continuing the line of the last two segments, or
    /// trailing behind a lone head
    fn grow(&self, snake: &mut Snake) {
        let end = snake.tail();
        let extension = if snake.len() > 1 {
            let before = snake.body[snake.len() - 2];
            end.moved_by(
                seam_step(end.row - before.row, self.config.rows as i32),
                seam_step(end.col - before.col, self.config.cols as i32),
            )
        } else {
            end.moved_in_direction(self.direction.opposite())
        };

        let extension = if self.config.wraparound {
            Position::new(
                extension.row.rem_euclid(self.config.rows as i32),
                extension.col.rem_euclid(self.config.cols as i32),
            )
        } else {
            extension
        };
        snake.body.push(extension);
    }

    /// Change direction. Reversing onto the body is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_wraparound(&mut self, enabled: bool) {
        self.config.wraparound = enabled;
    }

    /// Flip wraparound and return the new setting
    pub fn toggle_wraparound(&mut self) -> bool {
        self.config.wraparound = !self.config.wraparound;
        self.config.wraparound
    }

    /// Restart elapsed-time measurement from the current time
    pub fn begin_clock(&mut self) {
        let now = self.time.now();
        self.clock.begin(now);
    }

    /// Exclude `paused` from elapsed play time
    pub fn add_pause(&mut self, paused: std::time::Duration) {
        self.clock.add_pause(paused);
    }

    /// Current reading of the injected time source
    pub fn now(&self) -> std::time::Duration {
        self.time.now()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn wraparound(&self) -> bool {
        self.config.wraparound
    }

    /// Replace snake, direction and food, and repaint the grid to match
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, body: Vec<Position>, direction: Direction, food: Position) {
        self.snake = Snake { body };
        self.direction = direction;
        self.food = Some(food);
        self.game_over = None;

        let mut grid = Grid::new(self.config.rows, self.config.cols);
        grid.set_cell(food, Cell::Food);
        for &segment in self.snake.body.iter().skip(1) {
            grid.set_cell(segment, Cell::SnakeBody);
        }
        grid.set_cell(self.snake.head(), Cell::SnakeHead);
        self.grid = grid;
    }
}

/// Normalise a difference between neighbouring segments that straddle a
/// wraparound seam back to a unit step
fn seam_step(diff: i32, extent: i32) -> i32 {
    match diff {
        -1..=1 => diff,
        d if d == extent - 1 => -1,
        d if d == 1 - extent => 1,
        d => d.signum(),
    }
}

/// Rejection-sample an empty cell, falling back to the free-cell list when
/// the grid is crowded
fn sample_empty<R: Rng>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let attempts = grid.rows() * grid.cols() * 4;
    for _ in 0..attempts {
        let pos = Position::new(
            rng.gen_range(0..grid.rows()) as i32,
            rng.gen_range(0..grid.cols()) as i32,
        );
        if grid.cell_at(pos) == Some(Cell::Empty) {
            return Some(pos);
        }
    }
    grid.empty_cells().choose(rng).copied()
}
