//! GameLad - a handheld-console Snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the session state machine (game module)
//! - The fixed-period tick scheduler (scheduler module)
//! - Terminal collaborators: input, rendering and sound cues
//! - The console controller that ties them together (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod scheduler;
