//! Weakly compressible Newtonian fluid.

use crate::math::{Matrix, Real};
use crate::models::StressModel;
use crate::solver::Particle;

/// Newtonian viscous fluid with a Tait-style equation of state.
///
/// The pressure is driven by the volume ratio `J = det F`; the deviatoric
/// stress is proportional to the symmetric part of the particle's velocity
/// gradient from the previous gather.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NewtonianFluid {
    /// Dynamic viscosity (Pa·s).
    pub dynamic_viscosity: Real,
    /// Bulk modulus controlling the pressure response (Pa).
    pub bulk_modulus: Real,
    /// Tait exponent; 7 is the usual choice for water-like fluids.
    pub gamma: Real,
}

impl NewtonianFluid {
    /// Creates the model from viscosity and a bulk modulus, with the standard
    /// Tait exponent.
    pub fn new(dynamic_viscosity: Real, bulk_modulus: Real) -> Self {
        Self {
            dynamic_viscosity,
            bulk_modulus,
            gamma: 7.0,
        }
    }
}

impl StressModel for NewtonianFluid {
    fn calculate_stress(&self, particle: &mut Particle) {
        let j = particle.def_grad.determinant();
        let pressure = self.bulk_modulus * ((1.0 / j).powf(self.gamma) - 1.0);

        let grad_v = &particle.velocity_gradient;
        let strain_rate = (grad_v + grad_v.transpose()) * 0.5;
        let deviatoric = strain_rate - Matrix::identity() * (strain_rate.trace() / 3.0);

        particle.stress =
            deviatoric * (2.0 * self.dynamic_viscosity) - Matrix::identity() * pressure;
    }
}
