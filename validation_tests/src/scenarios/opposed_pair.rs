//! Two-particle symmetric momentum exchange.
//!
//! Two equal-mass particles approach each other with opposite velocities and
//! zero stress. Total momentum stays zero and the motion stays mirror
//! symmetric about the mid plane.

use crate::harness::ScenarioConfig;
use nalgebra::{point, vector};
use squish::math::Real;
use squish::models::{LinearElasticity, StressModel};
use squish::solver::{BoundaryCondition, Free, Particle};

/// Parameters for the opposed-pair test.
#[derive(Clone, Debug)]
pub struct OpposedPairParams {
    /// Approach speed of each particle (m/s).
    pub speed: Real,
    /// Time step size (s).
    pub dt: Real,
    /// Number of steps to run.
    pub total_steps: usize,
}

impl Default for OpposedPairParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            dt: 0.01,
            total_steps: 1,
        }
    }
}

/// Create an opposed-pair scenario.
pub fn opposed_pair_scenario(params: OpposedPairParams) -> ScenarioConfig {
    let materials: Vec<Box<dyn StressModel>> = vec![Box::new(LinearElasticity::new(1.0e6, 0.3))];
    let boundary_conditions: [Box<dyn BoundaryCondition>; 6] = [
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
    ];

    let particles = vec![
        Particle::new(
            point![0.75, 0.5, 0.5],
            vector![params.speed, 0.0, 0.0],
            1.0,
            0.01,
            0,
        ),
        Particle::new(
            point![1.25, 0.5, 0.5],
            vector![-params.speed, 0.0, 0.0],
            1.0,
            0.01,
            0,
        ),
    ];

    ScenarioConfig {
        name: "opposed_pair".to_string(),
        num_cells: [4, 2, 2],
        cell_width: 0.5,
        has_gravity: false,
        particles,
        materials,
        boundary_conditions,
        dt: params.dt,
        total_steps: params.total_steps,
        snapshot_interval: 1,
    }
}
