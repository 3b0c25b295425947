//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time and randomness are injected, so every rule can be driven from tests.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::{ConfigError, GameConfig, MAX_GRID_CELLS, MAX_STEP_RATE, MIN_STEP_RATE};
pub use engine::{GameEngine, GameOverReason, StepOutcome};
pub use state::{Cell, GameClock, Grid, Position, Snake};
