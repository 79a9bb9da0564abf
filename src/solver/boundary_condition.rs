//! Per-face boundary conditions on the nodal fields.

use crate::grid::Grid;
use crate::math::{Real, Vector};

/// A correction applied to nodal vector fields on one boundary face.
///
/// Six instances service the faces `0..6 = -x, +x, -y, +y, -z, +z`. The same
/// momentum-style interface corrects both the momentum and the velocity
/// fields; impulse corrections go through their own entry point.
pub trait BoundaryCondition: Send + Sync {
    /// Corrects a momentum-like nodal vector field on the given face.
    fn evaluate_momentum_condition(
        &self,
        grid: &Grid,
        face: usize,
        node_mass: &[Real],
        field: &mut [Vector<Real>],
    );

    /// Corrects the nodal impulse field on the given face.
    fn evaluate_impulse_condition(
        &self,
        grid: &Grid,
        face: usize,
        node_mass: &[Real],
        node_impulse: &mut [Vector<Real>],
    );

    /// Corrects the nodal velocity field on the given face.
    ///
    /// Velocity corrections share the momentum implementation; this alias
    /// only exists to make call sites explicit.
    fn evaluate_velocity_condition(
        &self,
        grid: &Grid,
        face: usize,
        node_mass: &[Real],
        node_velocity: &mut [Vector<Real>],
    ) {
        self.evaluate_momentum_condition(grid, face, node_mass, node_velocity);
    }
}

/// Open boundary: no correction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Free;

impl BoundaryCondition for Free {
    fn evaluate_momentum_condition(
        &self,
        _grid: &Grid,
        _face: usize,
        _node_mass: &[Real],
        _field: &mut [Vector<Real>],
    ) {
    }

    fn evaluate_impulse_condition(
        &self,
        _grid: &Grid,
        _face: usize,
        _node_mass: &[Real],
        _node_impulse: &mut [Vector<Real>],
    ) {
    }
}

/// Frictionless wall: zeroes the face-normal component on face nodes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FreeSlip;

impl FreeSlip {
    fn project(grid: &Grid, face: usize, field: &mut [Vector<Real>]) {
        let axis = face / 2;
        for node in grid.face_nodes(face) {
            field[node][axis] = 0.0;
        }
    }
}

impl BoundaryCondition for FreeSlip {
    fn evaluate_momentum_condition(
        &self,
        grid: &Grid,
        face: usize,
        _node_mass: &[Real],
        field: &mut [Vector<Real>],
    ) {
        Self::project(grid, face, field);
    }

    fn evaluate_impulse_condition(
        &self,
        grid: &Grid,
        face: usize,
        _node_mass: &[Real],
        node_impulse: &mut [Vector<Real>],
    ) {
        Self::project(grid, face, node_impulse);
    }
}

/// Sticking wall: zeroes the full vector on face nodes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoSlip;

impl NoSlip {
    fn clamp(grid: &Grid, face: usize, field: &mut [Vector<Real>]) {
        for node in grid.face_nodes(face) {
            field[node] = Vector::zeros();
        }
    }
}

impl BoundaryCondition for NoSlip {
    fn evaluate_momentum_condition(
        &self,
        grid: &Grid,
        face: usize,
        _node_mass: &[Real],
        field: &mut [Vector<Real>],
    ) {
        Self::clamp(grid, face, field);
    }

    fn evaluate_impulse_condition(
        &self,
        grid: &Grid,
        face: usize,
        _node_mass: &[Real],
        node_impulse: &mut [Vector<Real>],
    ) {
        Self::clamp(grid, face, node_impulse);
    }
}
