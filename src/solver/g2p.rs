//! Grid-to-particle gather: FLIP position and velocity update.

use crate::math::{Real, Vector};
use crate::solver::Particle;

/// Updates particle positions and velocities from the nodal momentum and
/// impulse fields.
///
/// The position advances with the end-of-step nodal momentum
/// `(p + Δt·imp) / m`; the velocity receives the nodal velocity *increment*
/// `imp / m` (FLIP update). Nodes without mass contribute nothing.
pub(crate) fn update_positions_and_velocities(
    particles: &mut [Particle],
    node_momentum: &[Vector<Real>],
    node_impulse: &[Vector<Real>],
    node_mass: &[Real],
    dt: Real,
) {
    for p in particles {
        for (k, &node) in p.node_ids.iter().enumerate() {
            let m = node_mass[node];
            if m > 0.0 {
                let weight = p.basis_values[k] / m;
                p.position += (node_momentum[node] + node_impulse[node]) * (dt * weight);
                p.velocity += node_impulse[node] * weight;
            }
        }
    }
}
