//! Sound cues played in response to game signals.

pub mod bell;

pub use bell::{Muted, TerminalBell};

use crate::game::Signal;

/// A short sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    FoodEaten,
    GameOver,
}

impl Cue {
    /// The cue a signal should trigger, if any
    pub fn for_signal(signal: Signal) -> Option<Cue> {
        match signal {
            Signal::FoodEaten => Some(Cue::FoodEaten),
            Signal::GameOver(_) => Some(Cue::GameOver),
            _ => None,
        }
    }
}

/// Anything that can play a [`Cue`]
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}
