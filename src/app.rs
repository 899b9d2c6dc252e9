use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant};
use tracing::{error, info, warn};

use crate::game::{GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::score::HighScores;

/// Render at 30 FPS, independent of the simulation tick rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// The interactive game session: engine, round state, scores, and the
/// terminal plumbing around them.
pub struct App {
    engine: GameEngine,
    state: GameState,
    scores: HighScores,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(mut engine: GameEngine, scores: HighScores) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            scores,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal; the TUI lives on stderr so stdout stays usable
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableFocusChange)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Single-threaded cooperative scheduling: the simulation deadline, the
    /// fixed one-second spawn cadence, the render timer, and the input
    /// stream all multiplex onto this task. No callback ever runs
    /// concurrently with another.
    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Fixed one-second cadence for the spawn scheduler, uncoupled from
        // the score-driven simulation speed. The first second elapses before
        // the first tick.
        let mut spawn_timer = interval_at(
            Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );

        let mut render_timer = interval(RENDER_INTERVAL);

        // The tick period is re-read after every tick, so a difficulty
        // change applies to the next scheduled tick, never an in-flight wait
        let mut tick_deadline = Instant::now() + self.state.difficulty.tick_interval;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation tick
                _ = tokio::time::sleep_until(tick_deadline) => {
                    self.tick();
                    tick_deadline = Instant::now() + self.state.difficulty.tick_interval;
                }

                // Spawn scheduler second
                _ = spawn_timer.tick() => {
                    self.engine.on_second(&mut self.state);
                }

                // Render frame
                _ = render_timer.tick() => {
                    let drawn = terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, self.engine.roster(), &self.scores);
                    });
                    if let Err(err) = drawn {
                        // Rendering faults stay at this boundary; the
                        // simulation keeps going
                        error!(%err, "failed to draw frame");
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn tick(&mut self) {
        let outcome = self.engine.step(&mut self.state);
        if outcome.game_over {
            self.scores.record(self.state.score);
            if let Err(err) = self.scores.save() {
                // The in-memory list stays authoritative for the session
                warn!(%err, "failed to persist high scores");
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => self.state.request_direction(direction),
                    KeyAction::TogglePause => self.state.toggle_pause(),
                    KeyAction::Restart => {
                        self.engine.request_restart(&mut self.state);
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::FocusLost => {
                info!("terminal lost focus, pausing");
                self.state.pause();
            }
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
