use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::presentation::Presentation;
use super::timer::{TickHandle, TickScheduler};
use crate::game::{Direction, GameEngine, GameOverReason, MAX_STEP_RATE, MIN_STEP_RATE};
use crate::metrics::SessionStats;

/// Where the game is in its run/pause/reset cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Stopped,
    Running,
    Paused,
    GameOver,
}

/// Snapshot of controller settings for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerStatus {
    pub lifecycle: Lifecycle,
    pub wraparound: bool,
    pub step_rate: u32,
    pub stats: SessionStats,
}

/// Owns the engine, the tick timer and the presentation, and turns input
/// events into lifecycle transitions.
///
/// At most one tick is pending at any time. A tick that arrives with a
/// handle other than the pending one (for example one that fired just as
/// it was cancelled) is ignored.
pub struct GameController<S: TickScheduler, P: Presentation, R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    scheduler: S,
    presentation: P,
    lifecycle: Lifecycle,
    pending_tick: Option<TickHandle>,
    paused_at: Option<Duration>,
    quit_requested: bool,
    stats: SessionStats,
}

impl<S: TickScheduler, P: Presentation, R: Rng> GameController<S, P, R> {
    pub fn new(engine: GameEngine<R>, scheduler: S, presentation: P) -> Self {
        let mut controller = Self {
            engine,
            scheduler,
            presentation,
            lifecycle: Lifecycle::Stopped,
            pending_tick: None,
            paused_at: None,
            quit_requested: false,
            stats: SessionStats::new(),
        };
        controller.repaint();
        controller.publish_labels();
        controller
    }

    /// Begin or resume play. Starting after a game over deals a new game.
    pub fn start(&mut self) {
        match self.lifecycle {
            Lifecycle::Running => return,
            Lifecycle::GameOver => {
                self.reset_game();
                self.engine.begin_clock();
            }
            Lifecycle::Paused => {
                if let Some(paused_at) = self.paused_at.take() {
                    let paused = self.engine.now().saturating_sub(paused_at);
                    self.engine.add_pause(paused);
                }
            }
            Lifecycle::Stopped => self.engine.begin_clock(),
        }

        info!(from = ?self.lifecycle, interval = ?self.engine.config().step_interval(), "start");
        self.lifecycle = Lifecycle::Running;
        self.schedule_tick();
    }

    /// Stop ticking and remember when. Only meaningful while running.
    pub fn pause(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.cancel_tick();
        self.paused_at = Some(self.engine.now());
        self.lifecycle = Lifecycle::Paused;
        info!("pause");
    }

    /// Deal a fresh game and wait for the next start
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.reset_game();
        self.paused_at = None;
        self.lifecycle = Lifecycle::Stopped;
        info!("reset");
    }

    pub fn quit(&mut self) {
        self.cancel_tick();
        self.quit_requested = true;
        info!("quit");
    }

    /// Flip wraparound and return the new setting
    pub fn toggle_wraparound(&mut self) -> bool {
        let enabled = self.engine.toggle_wraparound();
        info!(enabled, "wraparound toggled");
        enabled
    }

    /// Change the step rate. A tick that is already pending keeps its delay.
    pub fn set_step_rate(&mut self, rate: u32) {
        let clamped = rate.clamp(MIN_STEP_RATE, MAX_STEP_RATE);
        if clamped != rate {
            warn!(requested = rate, used = clamped, "step rate out of range");
        }
        self.engine.config_mut().step_rate = clamped;
        debug!(
            rate = clamped,
            interval = ?self.engine.config().step_interval(),
            "step rate changed"
        );
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.engine.set_direction(direction);
    }

    /// Handle a fired tick
    pub fn on_tick(&mut self, handle: TickHandle) {
        if self.pending_tick != Some(handle) || self.lifecycle != Lifecycle::Running {
            debug!(?handle, "ignoring stray tick");
            return;
        }
        self.pending_tick = None;

        let outcome = self.engine.step();
        self.publish_labels();

        match outcome.game_over {
            None => {
                self.repaint();
                self.schedule_tick();
            }
            Some(reason) => {
                if reason == GameOverReason::BoardFull {
                    self.repaint();
                }
                self.finish(reason);
            }
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.cancel_tick();
        self.lifecycle = Lifecycle::GameOver;
        let score = self.engine.clock().score;
        self.stats.on_game_over(score);
        self.presentation.show_game_over();
        info!(?reason, score, "game over");
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.presentation.clear_game_over();
        self.repaint();
        self.publish_labels();
    }

    fn schedule_tick(&mut self) {
        self.cancel_tick();
        let interval = self.engine.config().step_interval();
        self.pending_tick = Some(self.scheduler.schedule_after(interval));
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn repaint(&mut self) {
        for (pos, cell) in self.engine.grid().iter() {
            self.presentation.paint_cell(pos, cell);
        }
    }

    fn publish_labels(&mut self) {
        let clock = self.engine.clock();
        self.presentation.set_score_display(clock.score);
        self.presentation.set_time_display(clock.elapsed_secs);
        self.presentation.set_rate_display(clock.score_rate);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn step_rate(&self) -> u32 {
        self.engine.config().step_rate
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            lifecycle: self.lifecycle,
            wraparound: self.engine.wraparound(),
            step_rate: self.step_rate(),
            stats: self.stats.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut GameEngine<R> {
        &mut self.engine
    }
}
