//! Rigid block translation.
//!
//! A block of particles moving with a uniform velocity and zero stress must
//! translate at exactly that velocity, with the deformation gradient staying
//! at identity and volumes unchanged.

use crate::harness::{create_particle_block, ScenarioConfig};
use nalgebra::{point, vector};
use squish::math::Real;
use squish::models::{LinearElasticity, StressModel};
use squish::solver::{BoundaryCondition, Free};

/// Parameters for the rigid-translation test.
#[derive(Clone, Debug)]
pub struct RigidTranslationParams {
    /// Translation speed along +x (m/s).
    pub speed: Real,
    /// Time step size (s).
    pub dt: Real,
    /// Number of steps to run.
    pub total_steps: usize,
}

impl Default for RigidTranslationParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            dt: 0.01,
            total_steps: 50,
        }
    }
}

impl RigidTranslationParams {
    /// Expected advance along x after the full run.
    pub fn expected_advance(&self) -> Real {
        self.speed * self.dt * self.total_steps as Real
    }
}

/// Create a rigid-translation scenario.
pub fn rigid_translation_scenario(params: RigidTranslationParams) -> ScenarioConfig {
    let materials: Vec<Box<dyn StressModel>> = vec![Box::new(LinearElasticity::new(1.0e6, 0.3))];
    let boundary_conditions: [Box<dyn BoundaryCondition>; 6] = [
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
    ];

    let particles = create_particle_block(
        point![0.5, 0.5, 0.5],
        vector![0.2, 0.2, 0.2],
        0.1,
        1000.0,
        vector![params.speed, 0.0, 0.0],
        0,
    );

    ScenarioConfig {
        name: "rigid_translation".to_string(),
        num_cells: [8, 2, 2],
        cell_width: 0.5,
        has_gravity: false,
        particles,
        materials,
        boundary_conditions,
        dt: params.dt,
        total_steps: params.total_steps,
        snapshot_interval: 10,
    }
}
