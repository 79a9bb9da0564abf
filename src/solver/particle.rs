use crate::grid::Grid;
use crate::math::{Matrix, Point, Real, Vector};

/// Physical state of a single material point.
///
/// Carries all the Lagrangian state that evolves during simulation (position,
/// velocity, deformation gradient, volume, stress) together with the per-step
/// cell-binding scratch written by the locate kernel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position (m).
    pub position: Point<Real>,
    /// Current velocity (m/s).
    pub velocity: Vector<Real>,
    /// Particle mass (kg); strictly positive and constant.
    pub mass: Real,
    /// Current volume (m³); evolves with the deformation.
    pub volume: Real,
    /// Deformation gradient tracking how the particle has deformed from its
    /// initial state.
    pub def_grad: Matrix<Real>,
    /// Velocity gradient gathered from the grid; overwritten each step.
    pub velocity_gradient: Matrix<Real>,
    /// Cauchy stress tensor.
    pub stress: Matrix<Real>,
    /// Strain tensor; owned and updated by the material model.
    pub strain: Matrix<Real>,
    /// Index into the material-model table.
    pub model: usize,
    /// Node indices of the cell containing the particle; overwritten each
    /// step by the locate kernel.
    pub node_ids: [usize; Grid::NODES_PER_CELL],
    /// Shape-function values at the particle; overwritten each step.
    pub basis_values: [Real; Grid::NODES_PER_CELL],
    /// World-coordinate shape-function gradients at the particle; overwritten
    /// each step.
    pub basis_gradients: [Vector<Real>; Grid::NODES_PER_CELL],
}

impl Particle {
    /// Creates a seed candidate at the given position.
    ///
    /// The deformation gradient starts at identity; mass, velocity, and
    /// material id are stamped by the geometry that accepts the candidate.
    pub fn candidate(position: Point<Real>, volume: Real) -> Self {
        Self {
            position,
            velocity: Vector::zeros(),
            mass: 0.0,
            volume,
            def_grad: Matrix::identity(),
            velocity_gradient: Matrix::zeros(),
            stress: Matrix::zeros(),
            strain: Matrix::zeros(),
            model: 0,
            node_ids: [0; Grid::NODES_PER_CELL],
            basis_values: [0.0; Grid::NODES_PER_CELL],
            basis_gradients: [Vector::zeros(); Grid::NODES_PER_CELL],
        }
    }

    /// Creates a fully specified particle.
    pub fn new(
        position: Point<Real>,
        velocity: Vector<Real>,
        mass: Real,
        volume: Real,
        model: usize,
    ) -> Self {
        Self {
            velocity,
            mass,
            model,
            ..Self::candidate(position, volume)
        }
    }
}
