//! Per-frame integration for the radar bodies
//!
//! Semi-implicit Euler with one global step per frame: velocities are final
//! (forces + collisions) before positions move, then walls and damping apply.
//! There is no fixed-timestep decoupling from the frame rate.

use super::states::Body;

/// Half-width of the simulation box on every axis
pub const BOUNDS: f64 = 40.0;
/// Velocity multiplier per step in standard mode
pub const STANDARD_DAMPING: f64 = 0.98;
/// Velocity multiplier per step in orbital mode
pub const ORBITAL_DAMPING: f64 = 0.999;

/// Drift: x += v * time_speed
pub fn drift(bodies: &mut [Body], time_speed: f64) {
    for b in bodies.iter_mut() {
        b.x += b.v * time_speed;
    }
}

/// Reflect off the walls, each axis independently.
/// A coordinate past `bounds` is clamped back onto the wall (keeping its sign)
/// and that velocity component is reversed and scaled by the body's elasticity
pub fn reflect_at_bounds(bodies: &mut [Body], bounds: f64) {
    for b in bodies.iter_mut() {
        let e = b.elasticity();
        for axis in 0..3 {
            if b.x[axis].abs() > bounds {
                b.v[axis] *= -e;
                b.x[axis] = b.x[axis].signum() * bounds;
            }
        }
    }
}

/// Scale every velocity component by `damping`
pub fn damp(bodies: &mut [Body], damping: f64) {
    for b in bodies.iter_mut() {
        b.v *= damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec3;
    use crate::simulation::test_support::body_at;

    #[test]
    fn drift_scales_by_time_speed() {
        let mut bodies = vec![body_at("A", [1.0, 2.0, 3.0], 0.0)];
        bodies[0].v = NVec3::new(2.0, -2.0, 4.0);
        drift(&mut bodies, 0.5);
        assert_eq!(bodies[0].x, NVec3::new(2.0, 1.0, 5.0));
    }

    #[test]
    fn walls_clamp_and_reflect_each_axis() {
        let mut bodies = vec![body_at("A", [42.0, -45.0, 10.0], 0.0)];
        bodies[0].v = NVec3::new(2.0, -4.0, 1.0);
        bodies[0].visual.elasticity = 0.5;
        reflect_at_bounds(&mut bodies, BOUNDS);
        assert_eq!(bodies[0].x, NVec3::new(40.0, -40.0, 10.0));
        assert_eq!(bodies[0].v, NVec3::new(-1.0, 2.0, 1.0));
    }

    #[test]
    fn on_the_wall_is_not_past_it() {
        let mut bodies = vec![body_at("A", [40.0, 0.0, 0.0], 0.0)];
        bodies[0].v = NVec3::new(1.0, 0.0, 0.0);
        reflect_at_bounds(&mut bodies, BOUNDS);
        assert_eq!(bodies[0].v.x, 1.0);
    }
}
