//! Small-strain isotropic linear elasticity.

use crate::math::{Matrix, Real};
use crate::models::{ElasticCoefficients, StressModel};
use crate::solver::Particle;

/// Hookean solid with the small-strain tensor derived from the deformation
/// gradient.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearElasticity {
    /// Lamé parameters of the material.
    pub coefficients: ElasticCoefficients,
}

impl LinearElasticity {
    /// Creates the model from engineering constants.
    pub fn new(young_modulus: Real, poisson_ratio: Real) -> Self {
        Self {
            coefficients: ElasticCoefficients::from_young_modulus(young_modulus, poisson_ratio),
        }
    }
}

impl StressModel for LinearElasticity {
    fn calculate_stress(&self, particle: &mut Particle) {
        let f = &particle.def_grad;
        let strain = (f + f.transpose()) * 0.5 - Matrix::identity();

        particle.strain = strain;
        particle.stress = Matrix::identity() * (self.coefficients.lambda * strain.trace())
            + strain * (2.0 * self.coefficients.mu);
    }
}
