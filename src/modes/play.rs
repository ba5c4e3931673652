use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::audio::AudioSink;
use crate::game::difficulty::tick_period;
use crate::game::{Action, Direction, GameConfig, GameEngine, RoundState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};

/// Keys pressed right after a crash are ignored for this long so the
/// game-over screen is not skipped by accident
const GAME_OVER_GRACE: Duration = Duration::from_millis(500);

/// Interactive play in the terminal
pub struct PlayMode {
    engine: GameEngine,
    state: RoundState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioSink>,
    screen: Screen,
    game_over_at: Option<Instant>,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl PlayMode {
    pub fn new(config: GameConfig, audio: Box<dyn AudioSink>) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset().context("Failed to start round")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            screen: Screen::Title,
            game_over_at: None,
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_rate = self.state.tick_rate;
        let mut tick_timer = tick_interval(tick_rate);

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.screen, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Pacing follows the score
            if self.state.tick_rate != tick_rate {
                tick_rate = self.state.tick_rate;
                tick_timer = tick_interval(tick_rate);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Title => self.start_round(),
            Screen::Playing => match action {
                KeyAction::Steer(direction) => self.pending_direction = Some(direction),
                KeyAction::Restart => self.new_round(),
                KeyAction::Quit | KeyAction::Other => {}
            },
            Screen::GameOver => {
                let settled = self
                    .game_over_at
                    .is_none_or(|at| at.elapsed() >= GAME_OVER_GRACE);
                if settled {
                    self.new_round();
                }
            }
        }
    }

    fn update_game(&mut self) {
        let action = Action::from(self.pending_direction.take());
        let outcome = self.engine.tick(&mut self.state, action);

        self.audio.on_events(&outcome.events);
        for event in &outcome.events {
            self.metrics.record(event);
        }

        if outcome.terminated {
            self.metrics.on_round_over(outcome.score);
            self.screen = Screen::GameOver;
            self.game_over_at = Some(Instant::now());
        }
    }

    /// Leave the title screen with the round prepared in `new`
    fn start_round(&mut self) {
        self.screen = Screen::Playing;
        self.metrics.on_round_start();
        self.pending_direction = None;
    }

    fn new_round(&mut self) {
        match self.engine.reset() {
            Ok(state) => {
                self.state = state;
                self.start_round();
            }
            Err(err) => {
                log::error!("cannot start a new round: {err}");
                self.should_quit = true;
            }
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

fn tick_interval(tick_rate: u32) -> Interval {
    let mut timer = interval(tick_period(tick_rate));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
