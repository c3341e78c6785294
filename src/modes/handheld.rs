//! The handheld console: wires the game session to the terminal.
//!
//! Owns the [`Session`] and every collaborator around it. Each handler runs to
//! completion inside a single `select!` loop, and the tick scheduler is armed
//! or disarmed after every transition so it only fires while a game is running.

use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval};
use tracing::{debug, info};

use crate::audio::{AudioSink, Cue};
use crate::game::{Session, Signal};
use crate::input::{InputHandler, KeyAction, KeyDebouncer};
use crate::render::{BootPhase, Chrome, Renderer};
use crate::scheduler::TickScheduler;

pub struct HandheldMode {
    session: Session,
    scheduler: TickScheduler,
    renderer: Renderer,
    input_handler: InputHandler,
    debouncer: KeyDebouncer,
    audio: Box<dyn AudioSink + Send>,
    powered_at: Option<Instant>,
    should_quit: bool,
}

impl HandheldMode {
    pub fn new(session: Session, audio: Box<dyn AudioSink + Send>) -> Self {
        let scheduler = TickScheduler::new(session.config().tick_interval());

        Self {
            session,
            scheduler,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            debouncer: KeyDebouncer::new(false),
            audio,
            powered_at: None,
            should_quit: false,
        }
    }

    /// Flip the power switch before the loop starts
    pub fn power_on(&mut self) {
        if !self.session.is_powered() {
            self.dispatch(KeyAction::Power);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        let reports_releases = supports_keyboard_enhancement().unwrap_or(false);
        if reports_releases {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release reporting")?;
        }
        self.debouncer = KeyDebouncer::new(reports_releases);
        debug!(reports_releases, "keyboard configured");

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal, reports_releases)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw at 30 FPS so the boot animation advances between events
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while a game is running
                _ = self.scheduler.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {}

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            let chrome = self.chrome();
            terminal
                .draw(|frame| {
                    self.renderer.render(frame, &self.session.snapshot(), &chrome);
                })
                .context("Failed to draw frame")?;
        }

        info!("console shutting down");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if !self.debouncer.accept(&key) {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.dispatch(action);
        }
    }

    /// Apply one key action to the session
    fn dispatch(&mut self, action: KeyAction) -> Option<Signal> {
        let signal = match action {
            KeyAction::Button(command) => self.session.handle_input(command),
            KeyAction::Power => self.session.toggle_power(),
            KeyAction::Restart => self.session.new_game(),
            KeyAction::Quit => {
                self.should_quit = true;
                None
            }
            KeyAction::None => None,
        };
        self.react(signal);
        signal
    }

    fn on_tick(&mut self) -> Option<Signal> {
        let signal = self.session.tick();
        self.react(signal);
        signal
    }

    fn react(&mut self, signal: Option<Signal>) {
        if let Some(signal) = signal {
            match signal {
                Signal::PoweredOn => self.powered_at = Some(Instant::now()),
                Signal::PoweredOff => self.powered_at = None,
                // A fresh game gets a full first period
                Signal::GameStarted => self.scheduler.restart(),
                _ => {}
            }

            if let Some(cue) = Cue::for_signal(signal) {
                self.audio.play(cue);
            }
        }

        self.scheduler.sync(self.session.wants_ticks());
    }

    fn chrome(&self) -> Chrome {
        let boot = match self.powered_at {
            Some(at) => BootPhase::at(at.elapsed(), self.session.config().boot_duration()),
            None => BootPhase::Ready,
        };
        Chrome { boot }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        reports_releases: bool,
    ) -> Result<()> {
        if reports_releases {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to restore keyboard mode")?;
        }
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
    use crate::game::{CollisionType, Command, GameConfig, Position, SessionState, Snake};
    use std::sync::{Arc, Mutex};
    use tokio::time::timeout;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Cue>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.lock().unwrap().push(cue);
        }
    }

    fn console() -> (HandheldMode, Recorder) {
        let recorder = Recorder::default();
        let session = Session::with_seed(GameConfig::default(), 9);
        (HandheldMode::new(session, Box::new(recorder.clone())), recorder)
    }

    fn head(mode: &HandheldMode) -> Position {
        mode.session.snapshot().snake[0]
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_arms_scheduler() {
        let (mut mode, _) = console();
        assert_eq!(mode.dispatch(KeyAction::Button(Command::Start)), None);
        assert!(!mode.scheduler.is_armed());

        mode.power_on();
        assert!(!mode.scheduler.is_armed());

        assert_eq!(
            mode.dispatch(KeyAction::Button(Command::Start)),
            Some(Signal::GameStarted)
        );
        assert!(mode.scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks_and_resume_continues() {
        let (mut mode, _) = console();
        mode.power_on();
        mode.dispatch(KeyAction::Button(Command::Start));
        if let Some(game) = mode.session.game_mut() {
            game.food = Some(Position::new(15, 2));
        }

        mode.scheduler.tick().await;
        mode.on_tick();
        let before_pause = mode.session.game().cloned();
        assert_eq!(head(&mode), Position::new(6, 9));

        mode.dispatch(KeyAction::Button(Command::Start));
        assert_eq!(mode.session.state(), SessionState::Paused);
        assert!(!mode.scheduler.is_armed());
        let period = mode.scheduler.period();
        assert!(timeout(period * 4, mode.scheduler.tick()).await.is_err());
        assert_eq!(mode.session.game().cloned(), before_pause);

        mode.dispatch(KeyAction::Button(Command::Start));
        assert_eq!(mode.session.state(), SessionState::Running);
        mode.scheduler.tick().await;
        mode.on_tick();
        assert_eq!(head(&mode), Position::new(7, 9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_disarms_and_plays_cue() {
        let (mut mode, recorder) = console();
        mode.power_on();
        mode.dispatch(KeyAction::Button(Command::Start));
        if let Some(game) = mode.session.game_mut() {
            game.snake = Snake::from_cells(vec![Position::new(19, 9)]).unwrap();
        }

        mode.scheduler.tick().await;
        assert_eq!(
            mode.on_tick(),
            Some(Signal::GameOver(CollisionType::Wall))
        );
        assert!(!mode.scheduler.is_armed());
        assert_eq!(*recorder.0.lock().unwrap(), vec![Cue::GameOver]);

        // Start is ignored after game over; restart is its own action
        assert_eq!(mode.dispatch(KeyAction::Button(Command::Start)), None);
        assert_eq!(mode.dispatch(KeyAction::Restart), Some(Signal::GameStarted));
        assert!(mode.scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_game_waits_full_period() {
        let (mut mode, _) = console();
        mode.power_on();
        mode.dispatch(KeyAction::Button(Command::Start));
        let period = mode.scheduler.period();
        tokio::time::advance(period / 2).await;

        assert_eq!(mode.dispatch(KeyAction::Restart), Some(Signal::GameStarted));
        assert_eq!(mode.session.state(), SessionState::Running);
        let restarted = Instant::now();
        assert!(timeout(period / 2, mode.scheduler.tick()).await.is_err());

        mode.scheduler.tick().await;
        assert_eq!(restarted.elapsed(), period);
        mode.on_tick();
        assert_eq!(head(&mode), Position::new(6, 9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_food_plays_cue() {
        let (mut mode, recorder) = console();
        mode.power_on();
        mode.dispatch(KeyAction::Button(Command::Start));
        if let Some(game) = mode.session.game_mut() {
            game.food = Some(Position::new(6, 9));
        }

        mode.scheduler.tick().await;
        assert_eq!(mode.on_tick(), Some(Signal::FoodEaten));
        assert_eq!(*recorder.0.lock().unwrap(), vec![Cue::FoodEaten]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_power_off_tears_down() {
        let (mut mode, _) = console();
        mode.power_on();
        mode.dispatch(KeyAction::Button(Command::Start));
        assert!(mode.scheduler.is_armed());

        assert_eq!(mode.dispatch(KeyAction::Power), Some(Signal::PoweredOff));
        assert!(!mode.scheduler.is_armed());
        assert!(mode.session.game().is_none());
        assert!(mode.powered_at.is_none());
        assert_eq!(mode.dispatch(KeyAction::Button(Command::Up)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_boot_animation_timing() {
        let (mut mode, _) = console();
        mode.power_on();
        assert!(matches!(mode.chrome().boot, BootPhase::Booting { .. }));

        tokio::time::advance(mode.session.config().boot_duration()).await;
        assert_eq!(mode.chrome().boot, BootPhase::Ready);
    }

    #[test]
    fn test_quit() {
        let (mut mode, _) = console();
        mode.dispatch(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
