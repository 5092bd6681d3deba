//! Sphere-sphere collision pass
//!
//! Every body checks every other body (O(N²) per step, fine for the ~80
//! tickers the radar tracks). Overlapping, approaching pairs get an impulse
//! along the contact normal scaled by the *acting* body's elasticity only.
//! Each body resolves its own side of the contact, so momentum is not
//! conserved exactly; the rule is kept for its visual feel.
//!
//! Other bodies are read from the pre-step snapshot. The acting body's
//! velocity accumulates across its contacts in list order, so a body touching
//! several neighbours in one step depends on that order.

use crate::simulation::states::{Body, NVec3};

/// Resolve collisions for every body.
///
/// `snapshot` is the body set as it was at the start of the step, `velocities`
/// holds each body's in-progress velocity (snapshot velocity plus this step's
/// force deltas) and is updated in place.
pub fn resolve_collisions(snapshot: &[Body], velocities: &mut [NVec3]) {
    let n = snapshot.len();
    if n < 2 {
        return;
    }

    for i in 0..n {
        let bi = &snapshot[i];
        let mut v = velocities[i];

        for (j, bj) in snapshot.iter().enumerate() {
            if j == i {
                continue;
            }

            // normal from the other body toward this one
            let d = bi.x - bj.x;
            let distance = d.norm();
            let min_distance = bi.size() + bj.size();

            if distance < min_distance && distance > 0.0 {
                let normal = d / distance;
                let relative_velocity = (v - bj.v).dot(&normal);

                // negative: closing in on the other body
                if relative_velocity < 0.0 {
                    let impulse = relative_velocity * bi.elasticity();
                    v -= normal * impulse;
                }
            }
        }

        velocities[i] = v;
    }
}
