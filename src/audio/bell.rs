use std::io::Write;

use tracing::warn;

use super::{AudioSink, Cue};

const BEL: &[u8] = b"\x07";

/// Plays cues on the terminal bell: one ring for food, two for game over
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self, times: usize) -> std::io::Result<()> {
        for _ in 0..times {
            self.out.write_all(BEL)?;
        }
        self.out.flush()
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        let times = match cue {
            Cue::FoodEaten => 1,
            Cue::GameOver => 2,
        };
        if let Err(e) = self.ring(times) {
            warn!(?cue, error = %e, "failed to ring terminal bell");
        }
    }
}

/// Drops every cue
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: Cue) {}
}
