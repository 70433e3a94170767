//! Countdown timer shown during questions. Purely informational: it never gates a command.

use serde::{Deserialize, Serialize};

/// Seconds on the clock after a game start or an explicit reset.
pub const DEFAULT_TIMER_SECONDS: u32 = 100;

/// One-second granularity countdown. Something outside the session calls [`Countdown::tick`]
/// once per second while [`Countdown::running`] is true.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub seconds: u32,
    pub running: bool,
    /// Value restored by [`Countdown::reset`].
    pub start_seconds: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_SECONDS)
    }
}

impl Countdown {
    pub fn new(start_seconds: u32) -> Self {
        Self {
            seconds: start_seconds,
            running: false,
            start_seconds,
        }
    }

    /// Begin counting down. Does nothing when the clock is already at zero.
    pub fn start(&mut self) {
        if self.seconds > 0 {
            self.running = true;
        }
    }

    /// Halt counting without touching the remaining seconds.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and restore the starting value.
    pub fn reset(&mut self) {
        self.running = false;
        self.seconds = self.start_seconds;
    }

    /// Advance one second. Auto-stops on reaching zero. Returns whether the clock is still running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.seconds = self.seconds.saturating_sub(1);
        if self.seconds == 0 {
            self.running = false;
        }
        self.running
    }
}
