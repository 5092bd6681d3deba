//! One-frame physics stepper
//!
//! `PhysicsStepper` advances every body by one tick, in this order:
//! 1. force pass (standard attraction or orbital pull, chosen from the live
//!    gravity value), computed from a snapshot taken at the start of the step
//! 2. collision pass (when enabled), against the same snapshot
//! 3. drift: x += v * time_speed
//! 4. wall reflection
//! 5. damping (0.98 standard, 0.999 orbital)
//!
//! The stepper holds no per-frame state; everything lives in the bodies and
//! parameters handed to it.

use tracing::trace;

use crate::simulation::collision::resolve_collisions;
use crate::simulation::forces::{AccelSet, OrbitalPull, ValueAttraction};
use crate::simulation::integrator::{damp, drift, reflect_at_bounds, BOUNDS, ORBITAL_DAMPING, STANDARD_DAMPING};
use crate::simulation::params::{SimulationParameters, StepMode};
use crate::simulation::states::{Body, NVec3};

pub struct PhysicsStepper {
    pub standard: AccelSet, // terms used outside the equilibrium band
    pub orbital: AccelSet,  // terms used inside it
    pub bounds: f64,        // wall half-width
}

impl Default for PhysicsStepper {
    fn default() -> Self {
        Self {
            standard: AccelSet::new().with(ValueAttraction),
            orbital: AccelSet::new().with(OrbitalPull),
            bounds: BOUNDS,
        }
    }
}

impl PhysicsStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `bodies` by one frame. No-op for an empty set.
    pub fn step(&self, bodies: &mut [Body], params: &SimulationParameters) {
        let n = bodies.len();
        if n == 0 {
            return;
        }

        let mode = params.mode();
        let (forces, damping) = match mode {
            StepMode::Standard => (&self.standard, STANDARD_DAMPING),
            StepMode::Orbital => (&self.orbital, ORBITAL_DAMPING),
        };

        // every read below sees the bodies as they were at the start of the step
        let snapshot = bodies.to_vec();

        let mut dv = vec![NVec3::zeros(); n];
        forces.accumulate(params, &snapshot, &mut dv);

        let mut velocities: Vec<NVec3> = snapshot.iter().zip(dv.iter()).map(|(b, d)| b.v + d).collect();

        if params.collisions_enabled {
            resolve_collisions(&snapshot, &mut velocities);
        }

        for (b, v) in bodies.iter_mut().zip(velocities) {
            b.v = v;
        }

        drift(bodies, params.time_speed);
        reflect_at_bounds(bodies, self.bounds);
        damp(bodies, damping);

        trace!(?mode, bodies = n, "physics step");
    }
}
