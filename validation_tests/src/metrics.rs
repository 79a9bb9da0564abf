//! Metrics for comparing simulation trajectories.
//!
//! Provides quantitative measures for validating runs against recorded
//! reference trajectories. Particle storage order is deterministic, so
//! particles are matched by index.

use crate::harness::{SimulationSnapshot, SimulationTrajectory};
use serde::{Deserialize, Serialize};
use squish::math::Real;

/// Comparison metrics between two simulation trajectories.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    /// Name of the test scenario.
    pub scenario: String,
    /// Maximum position error across all particles and timesteps (m).
    pub max_position_error: Real,
    /// Mean position error across all particles and timesteps (m).
    pub mean_position_error: Real,
    /// Root mean squared position error (m).
    pub rmse_position: Real,
    /// Per-snapshot position errors (mean across particles).
    pub position_errors_over_time: Vec<Real>,
    /// Center of mass trajectory error.
    pub com_trajectory_error: Real,
    /// Final center of mass error.
    pub final_com_error: Real,
}

impl ComparisonMetrics {
    /// Compare two simulation trajectories and compute error metrics.
    ///
    /// Snapshots are matched by closest time, particles by storage index.
    pub fn compare(
        scenario: &str,
        reference: &SimulationTrajectory,
        test: &SimulationTrajectory,
    ) -> Result<Self, String> {
        if reference.snapshots.is_empty() || test.snapshots.is_empty() {
            return Err("Trajectories must have at least one snapshot".to_string());
        }

        let ref_end_time = reference.snapshots.last().map(|s| s.time).unwrap_or(0.0);
        let test_end_time = test.snapshots.last().map(|s| s.time).unwrap_or(0.0);
        let end_time = ref_end_time.min(test_end_time);

        let mut position_errors = Vec::new();
        let mut position_errors_over_time = Vec::new();
        let mut com_errors = Vec::new();

        for ref_snap in &reference.snapshots {
            if ref_snap.time > end_time {
                break;
            }

            let test_snap = find_closest_snapshot(&test.snapshots, ref_snap.time);
            let errors = particle_errors(ref_snap, test_snap);

            if !errors.is_empty() {
                let mean: Real = errors.iter().sum::<Real>() / errors.len() as Real;
                position_errors_over_time.push(mean);
                position_errors.extend(errors);
            }

            let ref_com = compute_com(ref_snap);
            let test_com = compute_com(test_snap);
            com_errors.push(distance(&ref_com, &test_com));
        }

        if position_errors.is_empty() {
            return Err("No particles to compare".to_string());
        }

        let max_position_error = position_errors.iter().cloned().fold(0.0, Real::max);
        let mean_position_error =
            position_errors.iter().sum::<Real>() / position_errors.len() as Real;
        let rmse_position = (position_errors.iter().map(|e| e * e).sum::<Real>()
            / position_errors.len() as Real)
            .sqrt();

        let com_trajectory_error = if com_errors.is_empty() {
            0.0
        } else {
            com_errors.iter().sum::<Real>() / com_errors.len() as Real
        };
        let final_com_error = *com_errors.last().unwrap_or(&0.0);

        Ok(ComparisonMetrics {
            scenario: scenario.to_string(),
            max_position_error,
            mean_position_error,
            rmse_position,
            position_errors_over_time,
            com_trajectory_error,
            final_com_error,
        })
    }

    /// Check if the test passes with the given tolerance.
    pub fn passes(&self, position_tolerance: Real) -> bool {
        self.mean_position_error <= position_tolerance
    }

    /// Generate a human-readable report.
    pub fn report(&self) -> String {
        format!(
            r#"Validation Report: {}
================================
Position Metrics:
  Max Error:  {:.6} m
  Mean Error: {:.6} m
  RMSE:       {:.6} m

Center of Mass:
  Trajectory Error: {:.6} m
  Final Error:      {:.6} m
"#,
            self.scenario,
            self.max_position_error,
            self.mean_position_error,
            self.rmse_position,
            self.com_trajectory_error,
            self.final_com_error
        )
    }

    /// Export metrics to JSON.
    pub fn export_json(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn find_closest_snapshot(snapshots: &[SimulationSnapshot], target_time: Real) -> &SimulationSnapshot {
    snapshots
        .iter()
        .min_by(|a, b| {
            let da = (a.time - target_time).abs();
            let db = (b.time - target_time).abs();
            da.partial_cmp(&db).unwrap()
        })
        .unwrap()
}

fn particle_errors(reference: &SimulationSnapshot, test: &SimulationSnapshot) -> Vec<Real> {
    reference
        .particles
        .iter()
        .zip(test.particles.iter())
        .map(|(r, t)| distance(&r.position, &t.position))
        .collect()
}

fn distance(a: &[Real; 3], b: &[Real; 3]) -> Real {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Compute the center of mass of a snapshot (uniform particle masses).
pub fn compute_com(snapshot: &SimulationSnapshot) -> [Real; 3] {
    if snapshot.particles.is_empty() {
        return [0.0, 0.0, 0.0];
    }

    let n = snapshot.particles.len() as Real;
    let sum = snapshot.particles.iter().fold([0.0, 0.0, 0.0], |acc, p| {
        [
            acc[0] + p.position[0],
            acc[1] + p.position[1],
            acc[2] + p.position[2],
        ]
    });

    [sum[0] / n, sum[1] / n, sum[2] / n]
}

/// Compute kinetic energy of the system for a uniform particle mass.
pub fn compute_kinetic_energy(snapshot: &SimulationSnapshot, particle_mass: Real) -> Real {
    snapshot
        .particles
        .iter()
        .map(|p| {
            let v2 = p.velocity[0].powi(2) + p.velocity[1].powi(2) + p.velocity[2].powi(2);
            0.5 * particle_mass * v2
        })
        .sum()
}

/// Compute potential energy of the system for a uniform particle mass.
pub fn compute_potential_energy(
    snapshot: &SimulationSnapshot,
    particle_mass: Real,
    gravity: Real,
    reference_height: Real,
) -> Real {
    snapshot
        .particles
        .iter()
        .map(|p| particle_mass * gravity * (p.position[2] - reference_height))
        .sum()
}
