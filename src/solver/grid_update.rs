//! Nodal force assembly and impulse integration.

use crate::math::{Real, Vector};
use crate::solver::{Particle, DEFAULT_GRAVITY};

/// Assembles the nodal internal forces from the particle stress divergence.
///
/// Each particle contributes `−V_p σᵀ ∇N_k` to its adjacent nodes.
pub(crate) fn accumulate_internal_forces(particles: &[Particle], node_force: &mut [Vector<Real>]) {
    node_force.fill(Vector::zeros());

    for p in particles {
        let weighted_stress = p.stress.transpose() * p.volume;
        for (k, &node) in p.node_ids.iter().enumerate() {
            node_force[node] -= weighted_stress * p.basis_gradients[k];
        }
    }
}

/// Integrates the nodal forces into impulses over one time step, adding
/// gravity when enabled.
pub(crate) fn integrate_impulse(
    node_force: &[Vector<Real>],
    node_mass: &[Real],
    dt: Real,
    has_gravity: bool,
    node_impulse: &mut [Vector<Real>],
) {
    for (imp, f) in node_impulse.iter_mut().zip(node_force.iter()) {
        *imp = f * dt;
    }

    if has_gravity {
        for (imp, &m) in node_impulse.iter_mut().zip(node_mass.iter()) {
            imp.z -= dt * m * DEFAULT_GRAVITY;
        }
    }
}
