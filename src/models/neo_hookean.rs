//! Compressible neo-hookean elasticity.

use crate::math::{Matrix, Real};
use crate::models::{ElasticCoefficients, StressModel};
use crate::solver::Particle;

/// Compressible neo-hookean solid.
///
/// Cauchy stress `σ = μ/J (F Fᵀ − I) + λ ln(J)/J I` with `J = det F`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NeoHookeanElasticity {
    /// Lamé parameters of the material.
    pub coefficients: ElasticCoefficients,
}

impl NeoHookeanElasticity {
    /// Creates the model from engineering constants.
    pub fn new(young_modulus: Real, poisson_ratio: Real) -> Self {
        Self {
            coefficients: ElasticCoefficients::from_young_modulus(young_modulus, poisson_ratio),
        }
    }
}

impl StressModel for NeoHookeanElasticity {
    fn calculate_stress(&self, particle: &mut Particle) {
        let f = &particle.def_grad;
        let j = f.determinant();
        let b = f * f.transpose();

        // Green-Lagrange strain, for inspection; the stress only needs F.
        particle.strain = (f.transpose() * f - Matrix::identity()) * 0.5;
        particle.stress = (b - Matrix::identity()) * (self.coefficients.mu / j)
            + Matrix::identity() * (self.coefficients.lambda * j.ln() / j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::matrix;

    #[test]
    fn undeformed_state_is_stress_free() {
        let model = NeoHookeanElasticity::new(1.0e6, 0.3);
        let mut particle = Particle::candidate(crate::math::Point::origin(), 1.0);

        model.calculate_stress(&mut particle);
        assert_relative_eq!(particle.stress.norm(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn small_stretch_matches_linear_elasticity() {
        // For infinitesimal strains the neo-hookean response linearizes to
        // Hooke's law.
        let neo = NeoHookeanElasticity::new(1.0e6, 0.25);
        let linear = LinearElasticityRef::new(1.0e6, 0.25);

        let eps = 1.0e-6;
        let f = matrix![
            1.0 + eps, 0.0, 0.0;
            0.0, 1.0, 0.0;
            0.0, 0.0, 1.0
        ];

        let mut particle = Particle::candidate(crate::math::Point::origin(), 1.0);
        particle.def_grad = f;
        neo.calculate_stress(&mut particle);

        let expected = (linear.lambda + 2.0 * linear.mu) * eps;
        assert_relative_eq!(particle.stress[(0, 0)], expected, epsilon = expected * 1.0e-4);
    }

    struct LinearElasticityRef {
        lambda: Real,
        mu: Real,
    }

    impl LinearElasticityRef {
        fn new(young_modulus: Real, poisson_ratio: Real) -> Self {
            let coeffs = ElasticCoefficients::from_young_modulus(young_modulus, poisson_ratio);
            Self {
                lambda: coeffs.lambda,
                mu: coeffs.mu,
            }
        }
    }
}
