//! Mock-exam countdown.

use std::time::Duration;

/// Remaining time at or below which the clock is shown as urgent.
pub const LOW_TIME: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamClock {
    remaining: Duration,
}

impl ExamClock {
    pub const fn new(duration_minutes: u32) -> Self {
        Self {
            remaining: Duration::from_secs(duration_minutes as u64 * 60),
        }
    }

    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance by `elapsed`, saturating at zero.
    pub const fn tick(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    pub const fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn is_low(&self) -> bool {
        self.remaining < LOW_TIME
    }

    /// `mm:ss` in whole seconds; minutes keep counting past 99.
    pub fn display(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
