//! Dam break.
//!
//! A column of weakly compressible fluid collapses under gravity inside a box
//! with free-slip walls. There is no closed-form solution; the scenario is
//! recorded for regression comparison between runs.

use crate::harness::ScenarioConfig;
use nalgebra::{point, vector};
use squish::grid::Grid;
use squish::math::Real;
use squish::models::{NewtonianFluid, StressModel};
use squish::sampling::{sample_geometries, Cuboid, Geometry};
use squish::solver::{BoundaryCondition, FreeSlip};

/// Parameters for the dam-break test.
#[derive(Clone, Debug)]
pub struct DamBreakParams {
    /// Fluid density (kg/m³).
    pub density: Real,
    /// Dynamic viscosity (Pa·s).
    pub viscosity: Real,
    /// Bulk modulus of the weakly compressible pressure response (Pa).
    pub bulk_modulus: Real,
    /// Time step size (s).
    pub dt: Real,
    /// Number of steps to run.
    pub total_steps: usize,
}

impl Default for DamBreakParams {
    fn default() -> Self {
        Self {
            density: 1000.0,
            viscosity: 1.0e-3,
            bulk_modulus: 5.0e4,
            dt: 1.0e-4,
            total_steps: 500,
        }
    }
}

/// Create a dam-break scenario.
pub fn dam_break_scenario(params: DamBreakParams) -> ScenarioConfig {
    let num_cells = [8, 4, 8];
    let cell_width = 0.125;
    let grid = Grid::new(num_cells[0], num_cells[1], num_cells[2], cell_width);

    // A fluid column against the -x wall, filling half the box height.
    let column: Vec<Box<dyn Geometry>> = vec![Box::new(Cuboid::new(
        point![0.0, 0.0, 0.0],
        point![0.25, 0.5, 0.5],
        params.density,
        vector![0.0, 0.0, 0.0],
        0,
    ))];
    let particles = sample_geometries(&grid, &column, 2);

    let materials: Vec<Box<dyn StressModel>> = vec![Box::new(NewtonianFluid::new(
        params.viscosity,
        params.bulk_modulus,
    ))];
    let boundary_conditions: [Box<dyn BoundaryCondition>; 6] = [
        Box::new(FreeSlip),
        Box::new(FreeSlip),
        Box::new(FreeSlip),
        Box::new(FreeSlip),
        Box::new(FreeSlip),
        Box::new(FreeSlip),
    ];

    ScenarioConfig {
        name: "dam_break".to_string(),
        num_cells,
        cell_width,
        has_gravity: true,
        particles,
        materials,
        boundary_conditions,
        dt: params.dt,
        total_steps: params.total_steps,
        snapshot_interval: 50,
    }
}
