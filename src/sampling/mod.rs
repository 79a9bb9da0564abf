//! Seeding of material points from solid geometries.
//!
//! Each cell of the background grid produces a deterministic set of candidate
//! positions; candidates falling inside a geometry become particles stamped
//! with that geometry's initial state.

pub use cuboid::Cuboid;
pub use sphere::Sphere;

use crate::grid::Grid;
use crate::math::{Point, Real};
use crate::solver::Particle;

mod cuboid;
mod sphere;

/// A solid region used to seed material points.
pub trait Geometry {
    /// Returns `true` if the point lies inside the geometry.
    fn contains(&self, point: &Point<Real>) -> bool;

    /// Stamps the initial state (velocity, mass from density, material id)
    /// onto a freshly seeded particle. The candidate volume and identity
    /// deformation gradient are already set by the seeding driver.
    fn initialize_particle(&self, particle: &mut Particle);
}

/// Seeds particles over a list of geometries.
///
/// Every cell contributes `order³` candidates; each candidate is tested
/// against the geometries in list order and the first containing geometry
/// stamps it. Candidates outside every geometry are discarded. Particle
/// ordering is deterministic: by cell index, then by candidate index.
pub fn sample_geometries(
    grid: &Grid,
    geometries: &[Box<dyn Geometry>],
    order: usize,
) -> Vec<Particle> {
    let mut particles = Vec::new();
    let mut candidates = Vec::with_capacity(Grid::particles_per_cell(order));
    let volume = grid.candidate_volume(order);

    for c in 0..grid.total_cells() {
        grid.seed_candidates(grid.cell_at(c), order, &mut candidates);

        for position in &candidates {
            for geometry in geometries {
                if geometry.contains(position) {
                    let mut particle = Particle::candidate(*position, volume);
                    geometry.initialize_particle(&mut particle);
                    particles.push(particle);
                    break;
                }
            }
        }
    }

    particles
}
