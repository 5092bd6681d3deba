//! Fixed-interval data refresh timer
//!
//! A repeating bevy [`Timer`] driven by frame deltas; `tick` reports when a
//! reload is due. Cancelling pauses the timer for good, nothing else is in
//! flight. The timer needs no `App`, so the headless runner ticks it the same
//! way the viewer does.

use std::time::Duration;

use bevy::time::{Timer, TimerMode};

/// Default reload cadence
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
pub struct RefreshTimer {
    timer: Timer,
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshTimer {
    /// A zero interval means "never refresh on a schedule"
    pub fn new(interval: Duration) -> Self {
        let mut timer = Timer::new(interval, TimerMode::Repeating);
        if interval.is_zero() {
            timer.pause();
        }
        Self { timer }
    }

    pub fn interval(&self) -> Duration {
        self.timer.duration()
    }

    /// Advance by `delta`; true when a refresh is due.
    /// Fires at most once per call, the remainder carries over.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta).just_finished()
    }

    /// Restart the countdown, e.g. after a manual refresh
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn cancel(&mut self) {
        self.timer.pause();
    }

    pub fn is_cancelled(&self) -> bool {
        self.timer.paused()
    }
}
