//! Validation test runner for the squish MPM solver.
//!
//! This binary runs the named validation scenarios, records particle
//! trajectories, and exports them as JSON and CSV for regression comparison.
//!
//! Usage:
//!   cargo run -p squish_validation_tests -- [OPTIONS]
//!
//! Options:
//!   --scenario <NAME>    Run a specific scenario (or "all")
//!   --output-dir <PATH>  Output directory for results
//!   --compare            Compare results against stored reference trajectories

use squish_validation::harness::{run_scenario, ScenarioConfig, SimulationTrajectory};
use squish_validation::metrics::ComparisonMetrics;
use squish_validation::scenarios::{
    dam_break::{dam_break_scenario, DamBreakParams},
    free_fall::{free_fall_scenario, FreeFallParams},
    opposed_pair::{opposed_pair_scenario, OpposedPairParams},
    rigid_translation::{rigid_translation_scenario, RigidTranslationParams},
};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut scenario_filter = "all".to_string();
    let mut output_dir = PathBuf::from("validation_results");
    let mut compare_mode = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                if i < args.len() {
                    scenario_filter = args[i].clone();
                }
            }
            "--output-dir" => {
                i += 1;
                if i < args.len() {
                    output_dir = PathBuf::from(&args[i]);
                }
            }
            "--compare" => {
                compare_mode = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    if compare_mode {
        compare_results(&scenario_filter, &output_dir);
        return;
    }

    std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    run_simulations(&scenario_filter, &output_dir);
}

fn scenario_names() -> [&'static str; 4] {
    ["free_fall", "opposed_pair", "rigid_translation", "dam_break"]
}

fn build_scenario(name: &str) -> Option<ScenarioConfig> {
    match name {
        "free_fall" => Some(free_fall_scenario(FreeFallParams::default())),
        "opposed_pair" => Some(opposed_pair_scenario(OpposedPairParams::default())),
        "rigid_translation" => {
            Some(rigid_translation_scenario(RigidTranslationParams::default()))
        }
        "dam_break" => Some(dam_break_scenario(DamBreakParams::default())),
        _ => None,
    }
}

fn run_simulations(scenario_filter: &str, output_dir: &PathBuf) {
    for name in scenario_names() {
        if scenario_filter != "all" && scenario_filter != name {
            continue;
        }

        let Some(config) = build_scenario(name) else {
            continue;
        };

        println!("\nRunning scenario: {}", name);
        println!("  Particles: {}", config.particles.len());
        println!("  Steps: {}", config.total_steps);

        match run_scenario(config) {
            Ok(trajectory) => {
                let json_path = output_dir.join(format!("{}.json", name));
                if let Err(e) = trajectory.export_json(&json_path) {
                    eprintln!("  Failed to export JSON: {}", e);
                } else {
                    println!("  Exported: {}", json_path.display());
                }

                let csv_dir = output_dir.join(format!("{}_csv", name));
                if let Err(e) = trajectory.export_csv(&csv_dir) {
                    eprintln!("  Failed to export CSV: {}", e);
                } else {
                    println!("  Exported CSV to: {}", csv_dir.display());
                }
            }
            Err(e) => {
                eprintln!("  Simulation failed: {}", e);
            }
        }
    }

    println!("\nValidation runs complete!");
}

fn compare_results(scenario_filter: &str, output_dir: &PathBuf) {
    let mut all_metrics: Vec<ComparisonMetrics> = Vec::new();

    for name in scenario_names() {
        if scenario_filter != "all" && scenario_filter != name {
            continue;
        }

        let current_path = output_dir.join(format!("{}.json", name));
        let reference_path = output_dir.join(format!("{}_reference.json", name));

        if !current_path.exists() {
            eprintln!("Skipping {}: results not found at {:?}", name, current_path);
            continue;
        }
        if !reference_path.exists() {
            eprintln!(
                "Skipping {}: reference not found at {:?}",
                name, reference_path
            );
            continue;
        }

        println!("\nComparing: {}", name);

        let current = match SimulationTrajectory::load_json(&current_path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("  Failed to load current trajectory: {}", e);
                continue;
            }
        };
        let reference = match SimulationTrajectory::load_json(&reference_path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("  Failed to load reference trajectory: {}", e);
                continue;
            }
        };

        match ComparisonMetrics::compare(name, &reference, &current) {
            Ok(metrics) => {
                println!("{}", metrics.report());

                let metrics_path = output_dir.join(format!("{}_metrics.json", name));
                if let Err(e) = metrics.export_json(&metrics_path) {
                    eprintln!("  Failed to save metrics: {}", e);
                }
                all_metrics.push(metrics);
            }
            Err(e) => {
                eprintln!("  Comparison failed: {}", e);
            }
        }
    }

    if !all_metrics.is_empty() {
        println!("\n{}", "=".repeat(72));
        println!("OVERALL VALIDATION SUMMARY");
        println!("{}", "=".repeat(72));
        println!(
            "{:<25} {:<15} {:<15} {:<15}",
            "Scenario", "Mean Pos Err", "RMSE", "Final COM Err"
        );
        println!("{}", "-".repeat(72));
        for m in &all_metrics {
            println!(
                "{:<25} {:<15.6} {:<15.6} {:<15.6}",
                m.scenario, m.mean_position_error, m.rmse_position, m.final_com_error
            );
        }
    }
}

fn print_help() {
    println!(
        r#"
Squish MPM Validation Test Runner

Usage:
  cargo run -p squish_validation_tests -- [OPTIONS]

Options:
  --scenario <NAME>     Run a specific scenario. Options:
                          all (default), free_fall, opposed_pair,
                          rigid_translation, dam_break

  --output-dir <PATH>   Output directory for results (default: validation_results)

  --compare             Compare current results against stored references.
                        Looks for <scenario>.json and <scenario>_reference.json
                        in the output directory.

  --help, -h            Show this help message

Workflow:
  1. Run this tool to generate trajectories
  2. Copy blessed results to <scenario>_reference.json
  3. Re-run after changes and compare: --compare
"#
    );
}
