//! Axis-aligned box seeding geometry.

use crate::math::{Point, Real, Vector};
use crate::sampling::Geometry;
use crate::solver::Particle;

/// An axis-aligned solid box seeding particles with a uniform initial state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cuboid {
    /// Lower corner of the box.
    pub mins: Point<Real>,
    /// Upper corner of the box. Membership is boundary-inclusive.
    pub maxs: Point<Real>,
    /// Initial material density (kg/m³).
    pub density: Real,
    /// Initial velocity stamped on seeded particles.
    pub velocity: Vector<Real>,
    /// Material-model index stamped on seeded particles.
    pub model: usize,
}

impl Cuboid {
    /// Creates a box geometry from its lower and upper corners.
    pub fn new(
        mins: Point<Real>,
        maxs: Point<Real>,
        density: Real,
        velocity: Vector<Real>,
        model: usize,
    ) -> Self {
        Self {
            mins,
            maxs,
            density,
            velocity,
            model,
        }
    }
}

impl Geometry for Cuboid {
    fn contains(&self, point: &Point<Real>) -> bool {
        (0..3).all(|d| point[d] >= self.mins[d] && point[d] <= self.maxs[d])
    }

    fn initialize_particle(&self, particle: &mut Particle) {
        particle.mass = self.density * particle.volume;
        particle.velocity = self.velocity;
        particle.model = self.model;
    }
}
