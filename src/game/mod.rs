//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host shell drives it through [`Session`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use food::place_food;
pub use grid::Grid;
pub use session::{Session, SessionState, Signal, Snapshot};
pub use state::{CollisionType, GameState, Position, Snake, Steering};
