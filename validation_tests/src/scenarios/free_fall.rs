//! Single-particle free fall.
//!
//! One particle dropped in a unit cell under gravity, with open boundaries.
//! The FLIP update integrates gravity exactly, so velocity and drop distance
//! have closed forms:
//!   v_z(n) = -n * dt * g
//!   drop(n) = -dt² * g * n (n + 1) / 2

use crate::harness::ScenarioConfig;
use nalgebra::{point, vector};
use squish::math::Real;
use squish::models::{LinearElasticity, StressModel};
use squish::solver::{BoundaryCondition, Free, Particle, DEFAULT_GRAVITY};

/// Parameters for the free-fall test.
#[derive(Clone, Debug)]
pub struct FreeFallParams {
    /// Initial particle height (m).
    pub start_height: Real,
    /// Time step size (s).
    pub dt: Real,
    /// Number of steps to run.
    pub total_steps: usize,
}

impl Default for FreeFallParams {
    fn default() -> Self {
        Self {
            start_height: 0.9,
            dt: 0.01,
            total_steps: 10,
        }
    }
}

impl FreeFallParams {
    /// Analytical vertical velocity after the full run.
    pub fn analytical_velocity(&self) -> Real {
        -(self.total_steps as Real) * self.dt * DEFAULT_GRAVITY
    }

    /// Analytical drop distance after the full run.
    pub fn analytical_drop(&self) -> Real {
        let n = self.total_steps as Real;
        -self.dt * self.dt * DEFAULT_GRAVITY * n * (n + 1.0) / 2.0
    }
}

/// Create a free-fall scenario.
pub fn free_fall_scenario(params: FreeFallParams) -> ScenarioConfig {
    let materials: Vec<Box<dyn StressModel>> = vec![Box::new(LinearElasticity::new(1.0e6, 0.3))];
    let boundary_conditions: [Box<dyn BoundaryCondition>; 6] = [
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
        Box::new(Free),
    ];

    let particles = vec![Particle::new(
        point![0.5, 0.5, params.start_height],
        vector![0.0, 0.0, 0.0],
        1.0,
        1.0,
        0,
    )];

    ScenarioConfig {
        name: "free_fall".to_string(),
        num_cells: [1, 1, 1],
        cell_width: 1.0,
        has_gravity: true,
        particles,
        materials,
        boundary_conditions,
        dt: params.dt,
        total_steps: params.total_steps,
        snapshot_interval: 1,
    }
}
