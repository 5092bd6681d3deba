//! Gravitational wave trigger
//!
//! A purely visual ripple: once triggered at a point it stays active for
//! [`WAVE_DURATION_SECS`] and then switches itself off on the next `update`.
//! Times are seconds on whatever clock the caller uses.

use crate::simulation::states::NVec3;

pub const WAVE_DURATION_SECS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GravitationalWave {
    pub active: bool,
    pub center: NVec3,
    pub started_at: f64,
}

impl Default for GravitationalWave {
    fn default() -> Self {
        Self {
            active: false,
            center: NVec3::zeros(),
            started_at: 0.0,
        }
    }
}

impl GravitationalWave {
    /// Start (or restart) a wave; a retrigger resets the timeout
    pub fn trigger(&mut self, center: NVec3, now: f64) {
        self.active = true;
        self.center = center;
        self.started_at = now;
    }

    /// Switch off once the wave has run for its full duration
    pub fn update(&mut self, now: f64) {
        if self.active && now - self.started_at >= WAVE_DURATION_SECS {
            self.active = false;
        }
    }

    /// Seconds since the trigger, `None` when inactive
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.active.then(|| (now - self.started_at).max(0.0))
    }
}
