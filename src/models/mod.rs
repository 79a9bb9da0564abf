//! Material models (linear elasticity, neo-hookean elasticity, viscous fluid).

use crate::math::Real;
use crate::solver::Particle;

pub use linear_elasticity::LinearElasticity;
pub use neo_hookean::NeoHookeanElasticity;
pub use newtonian_fluid::NewtonianFluid;

mod linear_elasticity;
mod neo_hookean;
mod newtonian_fluid;

/// A constitutive law evaluated once per particle and step.
///
/// Implementations read the particle's deformation gradient (and whatever
/// history they own on the particle) and write the Cauchy stress, optionally
/// updating the strain tensor as well.
pub trait StressModel: Send + Sync {
    /// Updates the particle's stress (and possibly strain) in place.
    fn calculate_stress(&self, particle: &mut Particle);
}

fn lame_lambda_mu(young_modulus: Real, poisson_ratio: Real) -> (Real, Real) {
    (
        young_modulus * poisson_ratio / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio)),
        shear_modulus(young_modulus, poisson_ratio),
    )
}

fn shear_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
    young_modulus / (2.0 * (1.0 + poisson_ratio))
}

/// Lamé parameters of an isotropic elastic material.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ElasticCoefficients {
    /// First Lamé parameter λ.
    pub lambda: Real,
    /// Shear modulus μ.
    pub mu: Real,
}

impl ElasticCoefficients {
    /// Converts engineering constants into Lamé parameters.
    pub fn from_young_modulus(young_modulus: Real, poisson_ratio: Real) -> Self {
        let (lambda, mu) = lame_lambda_mu(young_modulus, poisson_ratio);
        Self { lambda, mu }
    }
}
