use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};
use tracing::info;

use crate::controller::{GameController, TokioScheduler};
use crate::game::{GameConfig, GameEngine, MAX_STEP_RATE, MIN_STEP_RATE};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Display, Renderer};

pub struct HumanMode {
    controller: GameController<TokioScheduler, Display>,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let display = Display::new(config.rows, config.cols);
        let engine = GameEngine::new(config).context("Invalid game configuration")?;

        Ok(Self {
            controller: GameController::new(engine, TokioScheduler::new(), display),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        let stats = self.controller.stats();
        info!(best_score = stats.best_score, games = stats.games_played, "session ended");

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let deadline = self.controller.scheduler().deadline();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only while one is scheduled
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(handle) = self.controller.scheduler_mut().take_due() {
                        self.controller.on_tick(handle);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let status = self.controller.status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.controller.presentation(), &status);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.controller.quit();
                }
            }

            if self.controller.quit_requested() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.controller.set_direction(direction),
            KeyAction::Start => self.controller.start(),
            KeyAction::Pause => self.controller.pause(),
            KeyAction::Reset => self.controller.reset(),
            KeyAction::ToggleWraparound => {
                self.controller.toggle_wraparound();
            }
            KeyAction::StepRate(rate) => self.controller.set_step_rate(rate),
            KeyAction::Faster => {
                let rate = (self.controller.step_rate() + 1).min(MAX_STEP_RATE);
                self.controller.set_step_rate(rate);
            }
            KeyAction::Slower => {
                let rate = self.controller.step_rate().saturating_sub(1).max(MIN_STEP_RATE);
                self.controller.set_step_rate(rate);
            }
            KeyAction::Quit => self.controller.quit(),
            KeyAction::None => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Lifecycle;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.controller.lifecycle(), Lifecycle::Stopped);
        assert_eq!(mode.controller.engine().clock().score, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(HumanMode::new(GameConfig::new(1, 1)).is_err());
    }

    #[tokio::test]
    async fn test_key_events_drive_controller() {
        let mut mode = HumanMode::new(GameConfig::small()).unwrap();

        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.controller.lifecycle(), Lifecycle::Running);
        assert!(mode.controller.scheduler().deadline().is_some());

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.controller.lifecycle(), Lifecycle::Paused);
        assert!(mode.controller.scheduler().deadline().is_none());

        mode.handle_event(key(KeyCode::Char('5')));
        mode.handle_event(key(KeyCode::Char('+')));
        assert_eq!(mode.controller.step_rate(), 6);
        mode.handle_event(key(KeyCode::Char('0')));
        mode.handle_event(key(KeyCode::Char('+')));
        assert_eq!(mode.controller.step_rate(), 10);
        mode.handle_event(key(KeyCode::Char('1')));
        mode.handle_event(key(KeyCode::Char('-')));
        assert_eq!(mode.controller.step_rate(), 1);

        mode.handle_event(key(KeyCode::Char('t')));
        assert!(mode.controller.engine().wraparound());

        mode.handle_event(key(KeyCode::Char('x')));
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.controller.quit_requested());
    }
}
