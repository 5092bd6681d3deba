//! Runtime simulation parameters
//!
//! `SimulationParameters` holds the knobs exposed to the control surface:
//! - gravity strength (also selects the step mode),
//! - time speed (multiplier on the integration step),
//! - collision and physics toggles
//!
//! The step mode is never stored; it is derived from the live gravity value
//! every time [`SimulationParameters::mode`] is asked.

use tracing::info;

/// Gravity value that switches the stepper into orbital mode
pub const EQUILIBRIUM_GRAVITY: f64 = 0.05;
/// Half-width of the band around [`EQUILIBRIUM_GRAVITY`]
pub const EQUILIBRIUM_TOLERANCE: f64 = 0.005;

pub const GRAVITY_RANGE: (f64, f64) = (0.0, 0.1);
pub const TIME_SPEED_RANGE: (f64, f64) = (0.0, 1.0);

/// Force policy for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Standard, // attraction toward high-value centroid, damping 0.98
    Orbital,  // inverse-square pull to origin + radial damping, damping 0.999
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub gravity_strength: f64,
    pub time_speed: f64,
    pub collisions_enabled: bool,
    pub physics_enabled: bool, // false: the stepper is not scheduled at all
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravity_strength: 0.03,
            time_speed: 0.5,
            collisions_enabled: true,
            physics_enabled: true,
        }
    }
}

impl SimulationParameters {
    /// Store the new gravity. Returns true when it moved the step mode
    /// across the equilibrium band.
    pub fn set_gravity_strength(&mut self, gravity_strength: f64) -> bool {
        let before = self.mode();
        self.gravity_strength = gravity_strength;
        let after = self.mode();
        if before != after {
            info!(from = ?before, to = ?after, gravity_strength, "step mode changed");
        }
        before != after
    }

    pub fn set_time_speed(&mut self, time_speed: f64) {
        self.time_speed = time_speed;
    }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.collisions_enabled = enabled;
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
    }

    pub fn is_equilibrium(&self) -> bool {
        is_equilibrium(self.gravity_strength)
    }

    pub fn mode(&self) -> StepMode {
        if self.is_equilibrium() {
            StepMode::Orbital
        } else {
            StepMode::Standard
        }
    }
}

/// |g − 0.05| < 0.005
pub fn is_equilibrium(gravity_strength: f64) -> bool {
    (gravity_strength - EQUILIBRIUM_GRAVITY).abs() < EQUILIBRIUM_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equilibrium_band() {
        assert!(is_equilibrium(0.05));
        assert!(is_equilibrium(0.0549));
        assert!(is_equilibrium(0.0451));
        assert!(!is_equilibrium(0.056));
        assert!(!is_equilibrium(0.044));
        assert!(!is_equilibrium(0.0));
    }

    #[test]
    fn mode_follows_gravity_setter() {
        let mut p = SimulationParameters::default();
        assert_eq!(p.mode(), StepMode::Standard);
        assert!(p.set_gravity_strength(0.05));
        assert_eq!(p.mode(), StepMode::Orbital);
        assert!(p.set_gravity_strength(0.08));
        assert_eq!(p.mode(), StepMode::Standard);
    }

    #[test]
    fn moves_inside_one_band_are_not_mode_changes() {
        let mut p = SimulationParameters::default();
        assert!(!p.set_gravity_strength(0.02));
        assert!(!p.set_gravity_strength(0.1));
        p.set_gravity_strength(0.05);
        assert!(!p.set_gravity_strength(0.052));
        assert_eq!(p.gravity_strength, 0.052);
    }
}
