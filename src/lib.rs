//! Greedy Snake - a grid-based snake game for the terminal
//!
//! This library provides:
//! - Core game logic with injected time and randomness (game module)
//! - The run/pause/reset lifecycle and tick timer (controller module)
//! - TUI rendering and key mapping (render and input modules)
//! - The interactive terminal mode (modes module)

pub mod controller;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
