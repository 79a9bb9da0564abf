//! End-to-end expectations for the analytical validation scenarios.

use approx::assert_relative_eq;
use squish_validation::harness::run_scenario;
use squish_validation::metrics::compute_com;
use squish_validation::scenarios::{
    free_fall::{free_fall_scenario, FreeFallParams},
    opposed_pair::{opposed_pair_scenario, OpposedPairParams},
    rigid_translation::{rigid_translation_scenario, RigidTranslationParams},
};

#[test]
fn free_fall_matches_closed_form() {
    let params = FreeFallParams::default();
    let expected_velocity = params.analytical_velocity();
    let expected_drop = params.analytical_drop();
    let start_height = params.start_height;

    let trajectory = run_scenario(free_fall_scenario(params)).unwrap();
    let last = trajectory.snapshots.last().unwrap();
    let p = &last.particles[0];

    assert_relative_eq!(p.velocity[2], expected_velocity, epsilon = 1.0e-6);
    assert_relative_eq!(p.position[2], start_height + expected_drop, epsilon = 1.0e-6);
    assert_relative_eq!(p.position[0], 0.5, epsilon = 1.0e-12);
    assert_relative_eq!(p.position[1], 0.5, epsilon = 1.0e-12);
}

#[test]
fn opposed_pair_stays_symmetric() {
    let trajectory = run_scenario(opposed_pair_scenario(OpposedPairParams::default())).unwrap();
    let last = trajectory.snapshots.last().unwrap();
    let p0 = &last.particles[0];
    let p1 = &last.particles[1];

    // Equal masses: zero total momentum and a fixed center of mass.
    for d in 0..3 {
        assert_relative_eq!(p0.velocity[d] + p1.velocity[d], 0.0, epsilon = 1.0e-12);
    }
    let com = compute_com(last);
    assert_relative_eq!(com[0], 1.0, epsilon = 1.0e-12);
    assert_relative_eq!(com[1], 0.5, epsilon = 1.0e-12);
    assert_relative_eq!(com[2], 0.5, epsilon = 1.0e-12);
}

#[test]
fn rigid_translation_advances_exactly() {
    let params = RigidTranslationParams::default();
    let advance = params.expected_advance();

    let config = rigid_translation_scenario(params);
    let initial: Vec<[f64; 3]> = config
        .particles
        .iter()
        .map(|p| [p.position.x, p.position.y, p.position.z])
        .collect();

    let trajectory = run_scenario(config).unwrap();
    let last = trajectory.snapshots.last().unwrap();

    for (p, start) in last.particles.iter().zip(initial.iter()) {
        assert_relative_eq!(p.position[0], start[0] + advance, epsilon = 1.0e-9);
        assert_relative_eq!(p.position[1], start[1], epsilon = 1.0e-9);
        assert_relative_eq!(p.position[2], start[2], epsilon = 1.0e-9);
        assert_relative_eq!(p.velocity[0], 1.0, epsilon = 1.0e-9);
    }
}
