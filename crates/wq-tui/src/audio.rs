//! Success cue playback

use std::io::{self, Write};

use tracing::debug;

/// Fire-and-forget sound played on every accepted guess
pub trait AudioCue {
    fn play_success(&mut self);
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioCue for TerminalBell<W> {
    fn play_success(&mut self) {
        // Nobody waits on the cue, so a failed write is only logged
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            debug!("terminal bell failed: {e}");
        }
    }
}

/// Plays nothing (`--mute`)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioCue for Silent {
    fn play_success(&mut self) {}
}
