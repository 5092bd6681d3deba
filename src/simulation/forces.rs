//! Force contributors for the radar stepper
//!
//! Each contributor reads the pre-step body snapshot and adds a velocity
//! change into `out[i]`, so no body sees another body's half-updated state:
//! - [`ValueAttraction`]: standard mode, pull toward the high-value centroid
//! - [`OrbitalPull`]: equilibrium mode, inverse-square pull toward the origin
//!   plus radial velocity damping

use crate::simulation::params::SimulationParameters;
use crate::simulation::states::{Body, NVec3};

/// Rule of 40 at which a body becomes an attractor
pub const HIGH_VALUE_RULE_OF_40: f64 = 40.0;
/// Rule of 40 at which a body stops feeling attraction
pub const EXEMPT_RULE_OF_40: f64 = 60.0;

/// Scale applied to gravity strength in orbital mode
pub const ORBITAL_FORCE_SCALE: f64 = 50.0;
/// Fraction of radial velocity removed per step in orbital mode
pub const RADIAL_DAMPING: f64 = 0.1;

/// Collection of velocity-change terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single velocity delta per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total velocity deltas for all `bodies`.
    /// `out[i]` is zeroed first, then every term adds its contribution
    pub fn accumulate(&self, params: &SimulationParameters, bodies: &[Body], out: &mut [NVec3]) {
        for dv in out.iter_mut() {
            *dv = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(params, bodies, out);
        }
    }
}

/// A velocity-change source operating on a body snapshot
pub trait Acceleration {
    fn acceleration(&self, params: &SimulationParameters, bodies: &[Body], out: &mut [NVec3]);
}

/// Standard mode: bodies below the exemption threshold drift toward the
/// mean position of all high-value bodies.
///
/// `dv = (centroid - x) * g * (1 - rule_of_40 / 100)`
pub struct ValueAttraction;

impl ValueAttraction {
    /// Arithmetic mean position of bodies with rule_of_40 ≥ 40
    pub fn high_value_centroid(bodies: &[Body]) -> Option<NVec3> {
        let mut sum = NVec3::zeros();
        let mut count = 0usize;
        for b in bodies.iter().filter(|b| b.rule_of_40 >= HIGH_VALUE_RULE_OF_40) {
            sum += b.x;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(sum / count as f64)
    }
}

impl Acceleration for ValueAttraction {
    fn acceleration(&self, params: &SimulationParameters, bodies: &[Body], out: &mut [NVec3]) {
        let Some(center) = Self::high_value_centroid(bodies) else {
            return;
        };

        for (b, dv) in bodies.iter().zip(out.iter_mut()) {
            if b.rule_of_40 >= EXEMPT_RULE_OF_40 {
                continue;
            }
            let strength = params.gravity_strength * (1.0 - b.rule_of_40 / 100.0);
            *dv += (center - b.x) * strength;
        }
    }
}

/// Orbital mode: centripetal pull `g * 50 / r²` toward the origin, then 10 %
/// of the (post-pull) radial velocity removed. Bodies at the origin are
/// skipped since the direction is undefined.
pub struct OrbitalPull;

impl Acceleration for OrbitalPull {
    fn acceleration(&self, params: &SimulationParameters, bodies: &[Body], out: &mut [NVec3]) {
        for (b, dv) in bodies.iter().zip(out.iter_mut()) {
            let dist = b.x.norm();
            if dist == 0.0 {
                continue;
            }
            let radial = b.x / dist;

            let force = params.gravity_strength * ORBITAL_FORCE_SCALE / (dist * dist);
            let pulled = b.v - radial * force;

            let v_radial = pulled.dot(&radial);
            let damped = pulled - radial * (v_radial * RADIAL_DAMPING);

            *dv += damped - b.v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::test_support::body_at;

    #[test]
    fn no_attractors_means_no_force() {
        let bodies = vec![body_at("A", [5.0, 0.0, 0.0], 10.0), body_at("B", [-5.0, 0.0, 0.0], 20.0)];
        let params = SimulationParameters::default();
        let set = AccelSet::new().with(ValueAttraction);
        let mut out = vec![NVec3::zeros(); 2];
        set.accumulate(&params, &bodies, &mut out);
        assert_eq!(out, vec![NVec3::zeros(); 2]);
    }

    #[test]
    fn low_value_body_pulled_toward_centroid() {
        let bodies = vec![
            body_at("HI1", [10.0, 0.0, 0.0], 70.0),
            body_at("HI2", [10.0, 10.0, 0.0], 80.0),
            body_at("LO", [0.0, 0.0, 0.0], 20.0),
        ];
        let mut params = SimulationParameters::default();
        params.gravity_strength = 0.02;
        let set = AccelSet::new().with(ValueAttraction);
        let mut out = vec![NVec3::zeros(); 3];
        set.accumulate(&params, &bodies, &mut out);

        // attractors themselves are exempt
        assert_eq!(out[0], NVec3::zeros());
        assert_eq!(out[1], NVec3::zeros());

        let strength = 0.02 * (1.0 - 0.2);
        assert!((out[2].x - 10.0 * strength).abs() < 1e-12);
        assert!((out[2].y - 5.0 * strength).abs() < 1e-12);
        assert_eq!(out[2].z, 0.0);
    }

    #[test]
    fn mid_value_body_is_attractor_and_attracted() {
        let bodies = vec![body_at("MID", [4.0, 0.0, 0.0], 50.0), body_at("HI", [-4.0, 0.0, 0.0], 90.0)];
        let mut params = SimulationParameters::default();
        params.gravity_strength = 0.01;
        let mut out = vec![NVec3::zeros(); 2];
        AccelSet::new().with(ValueAttraction).accumulate(&params, &bodies, &mut out);
        // centroid at origin, MID moves toward it
        assert!(out[0].x < 0.0);
        assert_eq!(out[1], NVec3::zeros());
    }

    #[test]
    fn orbital_pull_points_inward_and_skips_origin() {
        let mut bodies = vec![body_at("A", [10.0, 0.0, 0.0], 0.0), body_at("O", [0.0, 0.0, 0.0], 0.0)];
        bodies[1].v = NVec3::new(1.0, 2.0, 3.0);
        let mut params = SimulationParameters::default();
        params.gravity_strength = 0.05;
        let mut out = vec![NVec3::zeros(); 2];
        AccelSet::new().with(OrbitalPull).accumulate(&params, &bodies, &mut out);

        // force = 0.05 * 50 / 100 = 0.025, radial v after pull = -0.025, damped by 10 %
        let expected = -0.025 + 0.0025;
        assert!((out[0].x - expected).abs() < 1e-12);
        assert_eq!(out[1], NVec3::zeros());
    }

    #[test]
    fn orbital_damping_leaves_tangential_velocity() {
        let mut bodies = vec![body_at("A", [0.0, 10.0, 0.0], 0.0)];
        bodies[0].v = NVec3::new(2.0, 0.0, 0.0);
        let mut params = SimulationParameters::default();
        params.gravity_strength = 0.05;
        let mut out = vec![NVec3::zeros(); 1];
        AccelSet::new().with(OrbitalPull).accumulate(&params, &bodies, &mut out);
        assert_eq!(out[0].x, 0.0);
        assert!(out[0].y < 0.0);
    }
}
