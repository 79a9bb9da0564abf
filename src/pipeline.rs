//! High-level simulation orchestration.

use crate::error::{Result, SolverError};
use crate::grid::{Grid, NodalFields};
use crate::math::Real;
use crate::models::StressModel;
use crate::output;
use crate::sampling::{self, Geometry};
use crate::solver::{
    accumulate_internal_forces, integrate_impulse, locate_particles, scatter_mass,
    scatter_momentum, scatter_velocity, update_gradients, update_positions_and_velocities,
    update_stress, BoundaryCondition, Particle, SimulationParams,
};

/// The MPM problem manager.
///
/// Owns the particle set and the nodal scratch fields, holds the background
/// grid, the material-model table, and the six per-face boundary conditions,
/// and drives the fixed per-step kernel sequence:
///
/// 1. locate particles and evaluate shape functions,
/// 2. scatter mass,
/// 3. scatter momentum (+ momentum boundary conditions),
/// 4. assemble internal forces from the stress divergence,
/// 5. integrate impulses (+ gravity + impulse boundary conditions),
/// 6. update particle positions and velocities (FLIP),
/// 7. compute nodal velocities (+ velocity boundary conditions),
/// 8. update particle gradients, deformation gradient, volume,
/// 9. update particle stress through the material models.
pub struct MpmPipeline {
    grid: Grid,
    particles: Vec<Particle>,
    materials: Vec<Box<dyn StressModel>>,
    boundary_conditions: Option<[Box<dyn BoundaryCondition>; 6]>,
    has_gravity: bool,
    fields: Option<NodalFields>,
}

impl MpmPipeline {
    /// Creates a pipeline over a fresh background grid.
    pub fn new(
        num_cells_x: usize,
        num_cells_y: usize,
        num_cells_z: usize,
        cell_width: Real,
        has_gravity: bool,
    ) -> Self {
        Self {
            grid: Grid::new(num_cells_x, num_cells_y, num_cells_z, cell_width),
            particles: Vec::new(),
            materials: Vec::new(),
            boundary_conditions: None,
            has_gravity,
            fields: None,
        }
    }

    /// The background grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The particle set.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Installs the material-model table indexed by the particles' model ids.
    pub fn set_material_models(&mut self, materials: Vec<Box<dyn StressModel>>) {
        self.materials = materials;
    }

    /// Installs the six per-face boundary conditions, in face order
    /// `-x, +x, -y, +y, -z, +z`.
    pub fn set_boundary_conditions(&mut self, boundary_conditions: [Box<dyn BoundaryCondition>; 6]) {
        self.boundary_conditions = Some(boundary_conditions);
    }

    /// Populates the particle set from a list of geometries.
    ///
    /// Candidates are seeded cell by cell; the first geometry containing a
    /// candidate stamps its initial state. Replaces any previous particle
    /// set.
    pub fn initialize(&mut self, geometries: &[Box<dyn Geometry>], order: usize) {
        self.particles = sampling::sample_geometries(&self.grid, geometries, order);
    }

    /// Appends externally constructed particles.
    pub fn append_particles(&mut self, particles: &[Particle]) {
        self.particles.extend_from_slice(particles);
    }

    fn validate(&self, dt: Real, write_frequency: Option<usize>) -> Result<()> {
        let invalid = |msg: &str| Err(SolverError::InvalidConfiguration(msg.to_string()));

        let [nx, ny, nz] = self.grid.num_cells();
        if nx == 0 || ny == 0 || nz == 0 {
            return invalid("the grid needs at least one cell along each axis");
        }
        if !(self.grid.cell_width() > 0.0) {
            return invalid("the cell width must be positive");
        }
        if !(dt > 0.0) {
            return invalid("the time step size must be positive");
        }
        if write_frequency == Some(0) {
            return invalid("the write frequency must be positive");
        }
        if self.materials.is_empty() {
            return invalid("no material models are set");
        }
        if self.boundary_conditions.is_none() {
            return invalid("no boundary conditions are set");
        }
        if self.particles.iter().any(|p| p.model >= self.materials.len()) {
            return invalid("a particle references a material model out of range");
        }

        Ok(())
    }

    /// Advances the simulation by a single step.
    pub fn step(&mut self, dt: Real) -> Result<()> {
        self.validate(dt, None)?;
        self.run_step(dt)
    }

    /// Runs the full solve: `num_steps` steps of size `dt`, with snapshot 0
    /// written before the loop, a snapshot after every `write_frequency`
    /// completed steps, and one final snapshot after the loop.
    pub fn solve(&mut self, params: &SimulationParams) -> Result<()> {
        self.validate(params.dt, Some(params.write_frequency))?;

        // Nodal scratch lives for the whole solve and is reset in place by
        // the kernels.
        self.fields = Some(NodalFields::new(self.grid.total_nodes()));

        let mut write_step = 0;
        output::write_snapshot(&params.output_path, write_step, &self.particles)?;

        let mut time = 0.0;
        for step in 0..params.num_steps {
            time += params.dt;

            if (step + 1) % params.write_frequency == 0 {
                log::info!("Time Step {}/{}: {} (s)", step + 1, params.num_steps, time);
            }

            self.run_step(params.dt)?;

            if (step + 1) % params.write_frequency == 0 {
                write_step += 1;
                output::write_snapshot(&params.output_path, write_step, &self.particles)?;
            }
        }

        output::write_snapshot(&params.output_path, write_step + 1, &self.particles)
    }

    fn run_step(&mut self, dt: Real) -> Result<()> {
        let num_nodes = self.grid.total_nodes();
        let mut fields = match self.fields.take() {
            Some(fields) if fields.num_nodes() == num_nodes => fields,
            _ => NodalFields::new(num_nodes),
        };

        let result = step_kernels(
            &self.grid,
            &mut self.particles,
            &self.materials,
            self.boundary_conditions
                .as_ref()
                .ok_or_else(|| SolverError::InvalidConfiguration("no boundary conditions are set".to_string()))?,
            &mut fields,
            self.has_gravity,
            dt,
        );

        self.fields = Some(fields);
        result
    }
}

fn step_kernels(
    grid: &Grid,
    particles: &mut [Particle],
    materials: &[Box<dyn StressModel>],
    boundary_conditions: &[Box<dyn BoundaryCondition>; 6],
    fields: &mut NodalFields,
    has_gravity: bool,
    dt: Real,
) -> Result<()> {
    locate_particles(grid, particles)?;

    scatter_mass(particles, &mut fields.mass);

    scatter_momentum(particles, &mut fields.momentum);
    for (face, bc) in boundary_conditions.iter().enumerate() {
        bc.evaluate_momentum_condition(grid, face, &fields.mass, &mut fields.momentum);
    }

    accumulate_internal_forces(particles, &mut fields.internal_force);

    integrate_impulse(
        &fields.internal_force,
        &fields.mass,
        dt,
        has_gravity,
        &mut fields.impulse,
    );
    for (face, bc) in boundary_conditions.iter().enumerate() {
        bc.evaluate_impulse_condition(grid, face, &fields.mass, &mut fields.impulse);
    }

    // The position update reads the pre-integration momentum plus the
    // impulse; it must run before the nodal velocity is computed so the
    // velocity gradient reflects the momentum state at the start of the step.
    update_positions_and_velocities(particles, &fields.momentum, &fields.impulse, &fields.mass, dt);

    scatter_velocity(particles, &fields.mass, &mut fields.velocity);
    for (face, bc) in boundary_conditions.iter().enumerate() {
        bc.evaluate_velocity_condition(grid, face, &fields.mass, &mut fields.velocity);
    }

    update_gradients(particles, &fields.velocity, dt);
    update_stress(particles, materials);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Matrix, Point, Vector};
    use crate::models::LinearElasticity;
    use crate::solver::{Free, FreeSlip, DEFAULT_GRAVITY};
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn free_boundaries() -> [Box<dyn BoundaryCondition>; 6] {
        [
            Box::new(Free),
            Box::new(Free),
            Box::new(Free),
            Box::new(Free),
            Box::new(Free),
            Box::new(Free),
        ]
    }

    fn slip_boundaries() -> [Box<dyn BoundaryCondition>; 6] {
        [
            Box::new(FreeSlip),
            Box::new(FreeSlip),
            Box::new(FreeSlip),
            Box::new(FreeSlip),
            Box::new(FreeSlip),
            Box::new(FreeSlip),
        ]
    }

    fn elastic_material() -> Vec<Box<dyn StressModel>> {
        vec![Box::new(LinearElasticity::new(1.0e6, 0.3))]
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("squish_pipeline_tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn configuration_is_validated_at_solve_entry() {
        let params = SimulationParams {
            num_steps: 1,
            dt: 0.01,
            output_path: test_dir("validation").join("out"),
            write_frequency: 1,
        };

        // No materials, no boundary conditions.
        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, false);
        assert!(matches!(
            pipeline.solve(&params),
            Err(SolverError::InvalidConfiguration(_))
        ));

        pipeline.set_material_models(elastic_material());
        assert!(matches!(
            pipeline.solve(&params),
            Err(SolverError::InvalidConfiguration(_))
        ));

        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.solve(&params).unwrap();

        // Bad time step.
        let bad = SimulationParams { dt: 0.0, ..params.clone() };
        assert!(matches!(
            pipeline.solve(&bad),
            Err(SolverError::InvalidConfiguration(_))
        ));

        // Out-of-range material id.
        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.append_particles(&[Particle::new(
            Point::new(0.5, 0.5, 0.5),
            Vector::zeros(),
            1.0,
            1.0,
            3,
        )]);
        assert!(matches!(
            pipeline.solve(&params),
            Err(SolverError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn particles_at_rest_stay_at_rest() {
        let mut pipeline = MpmPipeline::new(4, 4, 4, 0.25, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(slip_boundaries());
        pipeline.append_particles(&[
            Particle::new(Point::new(0.4, 0.4, 0.4), Vector::zeros(), 1.0, 0.01, 0),
            Particle::new(Point::new(0.6, 0.5, 0.55), Vector::zeros(), 2.0, 0.01, 0),
        ]);

        let before: Vec<_> = pipeline.particles().to_vec();
        for _ in 0..20 {
            pipeline.step(0.01).unwrap();
        }

        for (p, q) in pipeline.particles().iter().zip(before.iter()) {
            // Zero velocity, zero stress, no gravity: bitwise stable.
            assert_eq!(p.position, q.position);
            assert_eq!(p.velocity, q.velocity);
            assert_eq!(p.def_grad, Matrix::identity());
            assert_eq!(p.volume, q.volume);
        }
    }

    #[test]
    fn single_particle_free_fall() {
        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, true);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.append_particles(&[Particle::new(
            Point::new(0.5, 0.5, 0.9),
            Vector::zeros(),
            1.0,
            1.0,
            0,
        )]);

        let dt = 0.01;
        for _ in 0..10 {
            pipeline.step(dt).unwrap();
        }

        let p = &pipeline.particles()[0];
        assert_relative_eq!(p.velocity.z, -10.0 * dt * DEFAULT_GRAVITY, epsilon = 1.0e-6);
        assert_relative_eq!(p.position.z, 0.9 - 0.053955, epsilon = 1.0e-6);
        assert_relative_eq!(p.position.x, 0.5, epsilon = 1.0e-12);
        assert_relative_eq!(p.position.y, 0.5, epsilon = 1.0e-12);

        // Pure translation: the deformation state never changes.
        assert_relative_eq!(
            (p.def_grad - Matrix::identity()).norm(),
            0.0,
            epsilon = 1.0e-12
        );
        assert_relative_eq!(p.volume, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn opposed_particles_conserve_momentum() {
        let mut pipeline = MpmPipeline::new(4, 2, 2, 0.5, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.append_particles(&[
            Particle::new(Point::new(0.75, 0.5, 0.5), Vector::new(1.0, 0.0, 0.0), 1.0, 0.01, 0),
            Particle::new(Point::new(1.25, 0.5, 0.5), Vector::new(-1.0, 0.0, 0.0), 1.0, 0.01, 0),
        ]);

        pipeline.step(0.01).unwrap();

        let p0 = &pipeline.particles()[0];
        let p1 = &pipeline.particles()[1];

        let momentum = p0.velocity * p0.mass + p1.velocity * p1.mass;
        assert_relative_eq!(momentum.norm(), 0.0, epsilon = 1.0e-12);

        // Mirror symmetry about x = 1.
        assert_relative_eq!(p0.position.x - 0.75, -(p1.position.x - 1.25), epsilon = 1.0e-12);
        assert_relative_eq!(p0.position.y, p1.position.y, epsilon = 1.0e-12);
        assert_relative_eq!(p0.position.z, p1.position.z, epsilon = 1.0e-12);
    }

    #[test]
    fn rigid_translation_preserves_deformation() {
        let mut pipeline = MpmPipeline::new(8, 2, 2, 0.5, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());

        let velocity = Vector::new(1.0, 0.0, 0.0);
        let mut seeds = Vec::new();
        for i in 0..3 {
            for j in 0..2 {
                seeds.push(Particle::new(
                    Point::new(0.3 + 0.2 * i as Real, 0.4 + 0.2 * j as Real, 0.5),
                    velocity,
                    1.0,
                    0.01,
                    0,
                ));
            }
        }
        pipeline.append_particles(&seeds);

        let dt = 0.01;
        let num_steps = 20;
        for _ in 0..num_steps {
            pipeline.step(dt).unwrap();
        }

        for (p, seed) in pipeline.particles().iter().zip(seeds.iter()) {
            let expected_x = seed.position.x + num_steps as Real * dt;
            assert_relative_eq!(p.position.x, expected_x, epsilon = 1.0e-9);
            assert_relative_eq!(p.position.y, seed.position.y, epsilon = 1.0e-9);
            assert_relative_eq!(p.position.z, seed.position.z, epsilon = 1.0e-9);
            assert_relative_eq!(
                (p.def_grad - Matrix::identity()).norm(),
                0.0,
                epsilon = 1.0e-9
            );
            assert_relative_eq!(p.volume, seed.volume, epsilon = 1.0e-9);
            assert_relative_eq!((p.velocity - velocity).norm(), 0.0, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn snapshot_cadence_and_numbering() {
        let dir = test_dir("cadence");
        let prefix = dir.join("out");

        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.append_particles(&[Particle::new(
            Point::new(0.5, 0.5, 0.5),
            Vector::zeros(),
            1.0,
            1.0,
            0,
        )]);

        let params = SimulationParams {
            num_steps: 10,
            dt: 0.001,
            output_path: prefix.clone(),
            write_frequency: 3,
        };
        pipeline.solve(&params).unwrap();

        // 1 initial + floor(10 / 3) periodic + 1 final.
        for step in 0..=4 {
            assert!(dir.join(format!("out.csv.{}", step)).exists());
        }
        assert!(!dir.join("out.csv.5").exists());
    }

    #[test]
    fn final_snapshot_duplicates_last_periodic_write() {
        let dir = test_dir("cadence_aligned");
        let prefix = dir.join("out");

        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());
        pipeline.append_particles(&[Particle::new(
            Point::new(0.5, 0.5, 0.5),
            Vector::zeros(),
            1.0,
            1.0,
            0,
        )]);

        let params = SimulationParams {
            num_steps: 10,
            dt: 0.001,
            output_path: prefix.clone(),
            write_frequency: 5,
        };
        pipeline.solve(&params).unwrap();

        // Indices 0, 1, 2 from the cadence, then the extra end-state write.
        let last_periodic = std::fs::read_to_string(dir.join("out.csv.2")).unwrap();
        let final_write = std::fs::read_to_string(dir.join("out.csv.3")).unwrap();
        assert_eq!(last_periodic, final_write);
        assert!(!dir.join("out.csv.4").exists());
    }

    #[test]
    fn zero_steps_still_writes_initial_and_final_snapshots() {
        let dir = test_dir("zero_steps");
        let prefix = dir.join("out");

        let mut pipeline = MpmPipeline::new(1, 1, 1, 1.0, false);
        pipeline.set_material_models(elastic_material());
        pipeline.set_boundary_conditions(free_boundaries());

        let params = SimulationParams {
            num_steps: 0,
            dt: 0.001,
            output_path: prefix,
            write_frequency: 1,
        };
        pipeline.solve(&params).unwrap();

        assert!(dir.join("out.csv.0").exists());
        assert!(dir.join("out.csv.1").exists());
        assert!(!dir.join("out.csv.2").exists());
    }
}
