//! Validation infrastructure for the squish MPM solver.
//!
//! This crate provides utilities for:
//! - Running headless simulations over named scenarios
//! - Recording particle trajectories over time
//! - Exporting results to JSON/CSV
//! - Computing error metrics between trajectories
//!
//! # Usage
//!
//! ```bash
//! # Run all validation scenarios
//! cargo run -p squish_validation_tests -- --scenario all
//!
//! # Run one scenario into a chosen directory
//! cargo run -p squish_validation_tests -- --scenario free_fall --output-dir results
//! ```

pub mod harness;
pub mod metrics;
pub mod scenarios;

pub use harness::*;
pub use metrics::*;
