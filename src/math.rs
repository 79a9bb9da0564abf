//! Type aliases for the scalar and small-tensor types used across the solver.

/// The scalar type used by the solver.
pub type Real = f64;

/// The spatial dimension of the simulation.
pub const DIM: usize = 3;

/// A vector quantity (velocity, momentum, force).
pub type Vector<N> = nalgebra::Vector3<N>;

/// A second-order tensor (deformation gradient, stress, strain).
pub type Matrix<N> = nalgebra::Matrix3<N>;

/// A position in world space.
pub type Point<N> = nalgebra::Point3<N>;
