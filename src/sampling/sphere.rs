//! Spherical seeding geometry.

use crate::math::{Point, Real, Vector};
use crate::sampling::Geometry;
use crate::solver::Particle;

/// A solid sphere seeding particles with a uniform initial state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point<Real>,
    /// Radius of the sphere. Membership is boundary-inclusive.
    pub radius: Real,
    /// Initial material density (kg/m³).
    pub density: Real,
    /// Initial velocity stamped on seeded particles.
    pub velocity: Vector<Real>,
    /// Material-model index stamped on seeded particles.
    pub model: usize,
}

impl Sphere {
    /// Creates a sphere geometry.
    pub fn new(
        center: Point<Real>,
        radius: Real,
        density: Real,
        velocity: Vector<Real>,
        model: usize,
    ) -> Self {
        Self {
            center,
            radius,
            density,
            velocity,
            model,
        }
    }
}

impl Geometry for Sphere {
    fn contains(&self, point: &Point<Real>) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    fn initialize_particle(&self, particle: &mut Particle) {
        particle.mass = self.density * particle.volume;
        particle.velocity = self.velocity;
        particle.model = self.model;
    }
}
