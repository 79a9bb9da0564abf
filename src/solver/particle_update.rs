//! Constitutive update: velocity gradient, deformation gradient, volume,
//! stress.

use crate::math::{Matrix, Real, Vector};
use crate::models::StressModel;
use crate::solver::Particle;

/// Gathers the velocity gradient at each particle and integrates the
/// deformation gradient and volume.
///
/// With `W = Δt ∇v`, the deformation gradient advances by `F ← F + W F` and
/// the volume scales by `det(I + W)`.
pub(crate) fn update_gradients(
    particles: &mut [Particle],
    node_velocity: &[Vector<Real>],
    dt: Real,
) {
    for p in particles {
        let mut grad_v = Matrix::zeros();
        for (k, &node) in p.node_ids.iter().enumerate() {
            grad_v += p.basis_gradients[k] * node_velocity[node].transpose();
        }
        p.velocity_gradient = grad_v;

        let w = grad_v * dt;
        p.def_grad += w * p.def_grad;
        p.volume *= (Matrix::identity() + w).determinant();
    }
}

/// Dispatches each particle to its material model for the stress update.
pub(crate) fn update_stress(particles: &mut [Particle], materials: &[Box<dyn StressModel>]) {
    for p in particles {
        debug_assert!(p.model < materials.len());
        materials[p.model].calculate_stress(p);
    }
}
