//! Squish: explicit Material Point Method (MPM) continuum mechanics solver.
//!
//! Squish advances a cloud of Lagrangian material points (mass, velocity,
//! volume, deformation gradient, stress) coupled to a fixed Eulerian
//! background grid that serves only as scratch space for momentum balance.
//!
//! # Overview
//!
//! Each explicit time step transfers data between the two representations:
//! 1. **P2G (Particle-to-Grid)**: scatter particle mass and momentum to grid
//!    nodes and assemble the nodal internal forces from the stress divergence.
//! 2. **Grid Update**: integrate nodal impulses (internal forces, gravity)
//!    and apply the per-face boundary conditions.
//! 3. **G2P (Grid-to-Particle)**: advect the particles and update their
//!    velocities with the nodal impulse (FLIP update), then integrate the
//!    deformation gradient, volume, and stress per particle.
//!
//! # Example
//!
//! ```
//! use squish::pipeline::MpmPipeline;
//! use squish::models::{LinearElasticity, StressModel};
//! use squish::sampling::{Geometry, Sphere};
//! use squish::solver::{FreeSlip, SimulationParams};
//! use nalgebra::{point, vector};
//!
//! let mut pipeline = MpmPipeline::new(10, 10, 10, 0.1, true);
//!
//! let materials: Vec<Box<dyn StressModel>> =
//!     vec![Box::new(LinearElasticity::new(1.0e6, 0.3))];
//! pipeline.set_material_models(materials);
//!
//! pipeline.set_boundary_conditions([
//!     Box::new(FreeSlip), Box::new(FreeSlip),
//!     Box::new(FreeSlip), Box::new(FreeSlip),
//!     Box::new(FreeSlip), Box::new(FreeSlip),
//! ]);
//!
//! let ball: Vec<Box<dyn Geometry>> = vec![Box::new(Sphere::new(
//!     point![0.5, 0.5, 0.7],
//!     0.2,
//!     1000.0,
//!     vector![0.0, 0.0, 0.0],
//!     0,
//! ))];
//! pipeline.initialize(&ball, 2);
//!
//! let params = SimulationParams {
//!     num_steps: 10,
//!     dt: 1.0e-4,
//!     output_path: std::env::temp_dir().join("ball"),
//!     write_frequency: 5,
//! };
//! pipeline.solve(&params).unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`pipeline`]: high-level simulation orchestration
//! - [`solver`]: core MPM kernels (scatter, grid update, gather, particle
//!   update) and boundary conditions
//! - [`grid`]: the structured background grid and nodal scratch fields
//! - [`sampling`]: geometries and particle seeding
//! - [`models`]: material models (elasticity, viscous fluid)
//! - [`output`]: particle snapshot files

#![warn(missing_docs)]

pub mod error;
pub mod grid;
pub mod math;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sampling;
pub mod solver;

pub use error::{Result, SolverError};
pub use pipeline::MpmPipeline;
