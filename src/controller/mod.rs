//! Game lifecycle controller.
//!
//! Wires input events and a cancellable tick timer to the simulation
//! engine, and forwards every change to a [`Presentation`].

pub mod lifecycle;
pub mod presentation;
pub mod timer;

pub use lifecycle::{ControllerStatus, GameController, Lifecycle};
pub use presentation::Presentation;
pub use timer::{ManualScheduler, TickHandle, TickScheduler, TokioScheduler};
