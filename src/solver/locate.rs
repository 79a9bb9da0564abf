use crate::error::{Result, SolverError};
use crate::grid::Grid;
use crate::solver::Particle;

/// Binds every particle to its containing cell and evaluates the shape
/// functions there.
///
/// Writes the node ids, basis values, and basis gradients used by all the
/// transfer kernels of the current step. A particle outside the grid is a
/// hard failure.
pub(crate) fn locate_particles(grid: &Grid, particles: &mut [Particle]) -> Result<()> {
    for (index, p) in particles.iter_mut().enumerate() {
        let cell = grid
            .locate(&p.position)
            .ok_or(SolverError::ParticleOutOfDomain { index })?;

        p.node_ids = grid.cell_node_ids(cell);

        let ref_coords = grid.map_to_reference(&p.position, cell);
        p.basis_values = Grid::shape_values(&ref_coords);
        p.basis_gradients = grid.shape_gradients(&ref_coords);
    }

    Ok(())
}
