//! Particle-to-grid scatter kernels.

use crate::math::{Real, Vector};
use crate::solver::Particle;

/// Scatters particle masses onto the nodes.
pub(crate) fn scatter_mass(particles: &[Particle], node_mass: &mut [Real]) {
    node_mass.fill(0.0);

    for p in particles {
        for (k, &node) in p.node_ids.iter().enumerate() {
            node_mass[node] += p.basis_values[k] * p.mass;
        }
    }
}

/// Scatters particle momenta onto the nodes.
pub(crate) fn scatter_momentum(particles: &[Particle], node_momentum: &mut [Vector<Real>]) {
    node_momentum.fill(Vector::zeros());

    for p in particles {
        let momentum = p.velocity * p.mass;
        for (k, &node) in p.node_ids.iter().enumerate() {
            node_momentum[node] += momentum * p.basis_values[k];
        }
    }
}

/// Re-scatters particle momenta and divides by the nodal mass, producing the
/// nodal velocity field.
///
/// Nodes without mass get zero velocity. This deliberately re-scatters
/// instead of reusing the momentum field: it runs after the particle update
/// and must reflect the updated particle velocities through the basis values
/// bound at the start of the step.
pub(crate) fn scatter_velocity(
    particles: &[Particle],
    node_mass: &[Real],
    node_velocity: &mut [Vector<Real>],
) {
    node_velocity.fill(Vector::zeros());

    for p in particles {
        let momentum = p.velocity * p.mass;
        for (k, &node) in p.node_ids.iter().enumerate() {
            node_velocity[node] += momentum * p.basis_values[k];
        }
    }

    for (v, &m) in node_velocity.iter_mut().zip(node_mass.iter()) {
        if m > 0.0 {
            *v /= m;
        } else {
            *v = Vector::zeros();
        }
    }
}
