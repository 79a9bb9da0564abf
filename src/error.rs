//! Error types for the solver.

use thiserror::Error;

/// Failures surfaced by the simulation pipeline.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The pipeline was asked to run with an invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A particle moved outside the background grid.
    ///
    /// This indicates a simulation that has left the domain, usually because
    /// of a missing boundary condition or an unstable time step.
    #[error("particle {index} left the simulation domain")]
    ParticleOutOfDomain {
        /// Storage index of the lost particle.
        index: usize,
    },

    /// Snapshot output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results produced by the solver.
pub type Result<T> = std::result::Result<T, SolverError>;
