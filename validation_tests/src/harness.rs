//! Headless simulation harness for validation scenarios.
//!
//! Provides utilities for running MPM simulations without snapshot files and
//! extracting particle data for comparison between runs.

use serde::{Deserialize, Serialize};
use squish::math::{Point, Real, Vector};
use squish::models::StressModel;
use squish::pipeline::MpmPipeline;
use squish::solver::{BoundaryCondition, Particle};
use std::path::Path;

/// Recorded state of a single particle at a point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticleState {
    /// Particle position.
    pub position: [Real; 3],
    /// Particle velocity.
    pub velocity: [Real; 3],
}

/// Recorded state of the entire simulation at a point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Simulated time of the snapshot (s).
    pub time: Real,
    /// Step index of the snapshot.
    pub step: usize,
    /// All particle states, in storage order.
    pub particles: Vec<ParticleState>,
}

/// Complete trajectory of a simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationTrajectory {
    /// Scenario name.
    pub name: String,
    /// Time step size used (s).
    pub dt: Real,
    /// Recorded snapshots, in time order.
    pub snapshots: Vec<SimulationSnapshot>,
    /// Metadata about the simulation setup.
    pub metadata: SimulationMetadata,
}

/// Metadata about the simulation setup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationMetadata {
    /// Number of particles simulated.
    pub num_particles: usize,
    /// Background grid cell width (m).
    pub cell_width: Real,
    /// Whether gravity was enabled.
    pub has_gravity: bool,
}

impl SimulationTrajectory {
    /// Export trajectory to a JSON file.
    pub fn export_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Export trajectory to CSV files (one file per snapshot).
    pub fn export_csv(&self, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(dir)?;

        for snapshot in &self.snapshots {
            let filename = format!("step_{:06}.csv", snapshot.step);
            let path = dir.join(filename);

            let mut wtr = csv::Writer::from_path(path)?;
            wtr.write_record(["particle_id", "x", "y", "z", "vx", "vy", "vz"])?;

            for (i, p) in snapshot.particles.iter().enumerate() {
                wtr.write_record([
                    i.to_string(),
                    p.position[0].to_string(),
                    p.position[1].to_string(),
                    p.position[2].to_string(),
                    p.velocity[0].to_string(),
                    p.velocity[1].to_string(),
                    p.velocity[2].to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Ok(())
    }

    /// Load trajectory from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let trajectory: SimulationTrajectory = serde_json::from_str(&json)?;
        Ok(trajectory)
    }
}

/// Configuration for a validation scenario.
pub struct ScenarioConfig {
    /// Scenario name, used for output file naming.
    pub name: String,
    /// Background grid cell counts.
    pub num_cells: [usize; 3],
    /// Background grid cell width (m).
    pub cell_width: Real,
    /// Whether gravity is enabled.
    pub has_gravity: bool,
    /// Initial particle set.
    pub particles: Vec<Particle>,
    /// Material-model table.
    pub materials: Vec<Box<dyn StressModel>>,
    /// Per-face boundary conditions.
    pub boundary_conditions: [Box<dyn BoundaryCondition>; 6],
    /// Time step size (s).
    pub dt: Real,
    /// Number of steps to run.
    pub total_steps: usize,
    /// Record a snapshot every this many steps.
    pub snapshot_interval: usize,
}

/// Runs a scenario to completion and records its trajectory.
pub fn run_scenario(config: ScenarioConfig) -> squish::Result<SimulationTrajectory> {
    let mut pipeline = MpmPipeline::new(
        config.num_cells[0],
        config.num_cells[1],
        config.num_cells[2],
        config.cell_width,
        config.has_gravity,
    );
    pipeline.set_material_models(config.materials);
    pipeline.set_boundary_conditions(config.boundary_conditions);
    pipeline.append_particles(&config.particles);

    let mut snapshots = vec![extract_snapshot(&pipeline, 0, 0.0)];

    let mut time = 0.0;
    for step in 1..=config.total_steps {
        pipeline.step(config.dt)?;
        time += config.dt;

        if step % config.snapshot_interval == 0 {
            snapshots.push(extract_snapshot(&pipeline, step, time));
            log::info!("{}: step {}/{}", config.name, step, config.total_steps);
        }
    }

    Ok(SimulationTrajectory {
        name: config.name,
        dt: config.dt,
        snapshots,
        metadata: SimulationMetadata {
            num_particles: config.particles.len(),
            cell_width: config.cell_width,
            has_gravity: config.has_gravity,
        },
    })
}

fn extract_snapshot(pipeline: &MpmPipeline, step: usize, time: Real) -> SimulationSnapshot {
    let particles = pipeline
        .particles()
        .iter()
        .map(|p| ParticleState {
            position: [p.position.x, p.position.y, p.position.z],
            velocity: [p.velocity.x, p.velocity.y, p.velocity.z],
        })
        .collect();

    SimulationSnapshot {
        time,
        step,
        particles,
    }
}

/// Helper to create a block of particles in a grid pattern.
pub fn create_particle_block(
    center: Point<Real>,
    half_extents: Vector<Real>,
    spacing: Real,
    density: Real,
    velocity: Vector<Real>,
    model: usize,
) -> Vec<Particle> {
    let mut particles = vec![];
    let volume = spacing * spacing * spacing;

    let nx = (half_extents.x * 2.0 / spacing).ceil() as i32;
    let ny = (half_extents.y * 2.0 / spacing).ceil() as i32;
    let nz = (half_extents.z * 2.0 / spacing).ceil() as i32;

    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let offset = Vector::new(
                    (i as Real + 0.5) * spacing - half_extents.x,
                    (j as Real + 0.5) * spacing - half_extents.y,
                    (k as Real + 0.5) * spacing - half_extents.z,
                );
                particles.push(Particle::new(
                    center + offset,
                    velocity,
                    density * volume,
                    volume,
                    model,
                ));
            }
        }
    }

    particles
}
