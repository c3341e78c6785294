//! Lifecycle of the console's game: power, title screen, play, pause and game over.
//!
//! The [`Session`] is the single owner of all mutable game data. Every
//! operation returns the [`Signal`] it produced, if any, so the host can drive
//! its scheduler, renderer and sound from the outcome.

use tracing::{debug, info};

use super::{
    action::Command,
    config::GameConfig,
    engine::GameEngine,
    grid::Grid,
    state::{CollisionType, GameState, Position},
};

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Console powered off; inert
    Off,
    /// Powered on, no game yet
    Idle,
    Running,
    Paused,
    /// The last game ended in a collision
    Ended,
}

/// Lifecycle signal emitted by a transition or a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    PoweredOn,
    PoweredOff,
    GameStarted,
    Paused,
    Resumed,
    FoodEaten,
    GameOver(CollisionType),
}

/// Read-only view of the session handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub state: SessionState,
    pub grid: Grid,
    pub snake: &'a [Position],
    pub food: Option<Position>,
    pub score: u32,
}

pub struct Session {
    engine: GameEngine,
    state: SessionState,
    game: Option<GameState>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_engine(GameEngine::with_seed(config, seed))
    }

    fn with_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            state: SessionState::Off,
            game: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_powered(&self) -> bool {
        self.state != SessionState::Off
    }

    /// Whether the tick scheduler should be running
    pub fn wants_ticks(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn power_on(&mut self) -> Option<Signal> {
        match self.state {
            SessionState::Off => {
                self.transition(SessionState::Idle);
                Some(Signal::PoweredOn)
            }
            _ => None,
        }
    }

    /// Tear everything down; the next power-on starts from a blank console
    pub fn power_off(&mut self) -> Option<Signal> {
        match self.state {
            SessionState::Off => None,
            _ => {
                self.game = None;
                self.transition(SessionState::Off);
                Some(Signal::PoweredOff)
            }
        }
    }

    pub fn toggle_power(&mut self) -> Option<Signal> {
        if self.is_powered() {
            self.power_off()
        } else {
            self.power_on()
        }
    }

    /// Route a console button press
    pub fn handle_input(&mut self, command: Command) -> Option<Signal> {
        match (self.state, command) {
            (SessionState::Off, _) => None,
            (SessionState::Idle, Command::Start) => self.start_game(),
            (SessionState::Idle, _) => None,
            (SessionState::Running, Command::Start) => {
                self.transition(SessionState::Paused);
                Some(Signal::Paused)
            }
            (SessionState::Running, _) => {
                if let (Some(direction), Some(game)) = (command.direction(), self.game.as_mut()) {
                    if !game.steering.request(direction) {
                        debug!(?direction, "reversal request dropped");
                    }
                }
                None
            }
            (SessionState::Paused, Command::Start) => {
                self.transition(SessionState::Running);
                Some(Signal::Resumed)
            }
            (SessionState::Paused, _) => None,
            (SessionState::Ended, _) => None,
        }
    }

    /// Discard any game in progress and start a fresh one
    pub fn new_game(&mut self) -> Option<Signal> {
        match self.state {
            SessionState::Off => None,
            _ => self.start_game(),
        }
    }

    /// Advance the running game by one tick
    pub fn tick(&mut self) -> Option<Signal> {
        if self.state != SessionState::Running {
            return None;
        }
        let game = self.game.as_mut()?;

        let result = self.engine.step(game);

        if let Some(collision) = result.collision_type {
            info!(?collision, score = game.score, steps = game.steps, "game over");
            self.transition(SessionState::Ended);
            return Some(Signal::GameOver(collision));
        }

        if result.ate_food {
            debug!(score = game.score, length = game.snake.body.len(), "food eaten");
            return Some(Signal::FoodEaten);
        }

        None
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let grid = self.engine.grid();
        match &self.game {
            Some(game) => Snapshot {
                state: self.state,
                grid,
                snake: &game.snake.body,
                food: game.food,
                score: game.score,
            },
            None => Snapshot {
                state: self.state,
                grid,
                snake: &[],
                food: None,
                score: 0,
            },
        }
    }

    fn start_game(&mut self) -> Option<Signal> {
        self.game = Some(self.engine.new_game());
        self.transition(SessionState::Running);
        Some(Signal::GameStarted)
    }

    fn transition(&mut self, next: SessionState) {
        info!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }
}
