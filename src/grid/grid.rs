//! Uniform structured background grid with trilinear shape functions.

use crate::math::{Point, Real, Vector};

/// Corner signs of the reference hexahedron, in the local node order produced
/// by [`Grid::cell_node_ids`]: the four corners of the lower z-face
/// counter-clockwise, then the same four at the upper z-face.
const CORNER_SIGNS: [[Real; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// The uniform background grid used as scratch space for momentum balance.
///
/// Cells are axis-aligned cubes of side [`Grid::cell_width`], with the grid
/// origin at the world origin. Nodes live at cell corners; shape functions
/// are trilinear on each cell and are evaluated in the cell's reference frame
/// `[-1, 1]³`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    num_cells: [usize; 3],
    cell_width: Real,
}

impl Grid {
    /// Number of nodes adjacent to one cell.
    pub const NODES_PER_CELL: usize = 8;

    /// Creates a grid with the given number of cells along each axis.
    pub fn new(num_cells_x: usize, num_cells_y: usize, num_cells_z: usize, cell_width: Real) -> Self {
        Self {
            num_cells: [num_cells_x, num_cells_y, num_cells_z],
            cell_width,
        }
    }

    /// Number of cells along each axis.
    pub fn num_cells(&self) -> [usize; 3] {
        self.num_cells
    }

    /// Side length of one cubic cell.
    pub fn cell_width(&self) -> Real {
        self.cell_width
    }

    /// Total number of cells.
    pub fn total_cells(&self) -> usize {
        self.num_cells[0] * self.num_cells[1] * self.num_cells[2]
    }

    /// Total number of nodes.
    pub fn total_nodes(&self) -> usize {
        let n = self.nodes_per_axis();
        n[0] * n[1] * n[2]
    }

    /// World-space extent of the grid along each axis.
    pub fn extents(&self) -> Vector<Real> {
        Vector::new(
            self.num_cells[0] as Real * self.cell_width,
            self.num_cells[1] as Real * self.cell_width,
            self.num_cells[2] as Real * self.cell_width,
        )
    }

    fn nodes_per_axis(&self) -> [usize; 3] {
        [
            self.num_cells[0] + 1,
            self.num_cells[1] + 1,
            self.num_cells[2] + 1,
        ]
    }

    /// Global index of the node at grid coordinate `(i, j, k)`.
    pub fn node_index(&self, coords: [usize; 3]) -> usize {
        let n = self.nodes_per_axis();
        coords[2] * n[0] * n[1] + coords[1] * n[0] + coords[0]
    }

    /// Grid coordinate of the cell with the given linear index.
    pub fn cell_at(&self, index: usize) -> [usize; 3] {
        let [nx, ny, _] = self.num_cells;
        [index % nx, (index / nx) % ny, index / (nx * ny)]
    }

    /// Cell containing the given position, or `None` if the position lies
    /// outside the grid.
    pub fn locate(&self, position: &Point<Real>) -> Option<[usize; 3]> {
        let mut cell = [0; 3];

        for d in 0..3 {
            let c = (position[d] / self.cell_width).floor();
            if c < 0.0 || c >= self.num_cells[d] as Real {
                return None;
            }
            cell[d] = c as usize;
        }

        Some(cell)
    }

    /// Global indices of the eight nodes of a cell, in the local order fixed
    /// by the shape-function evaluation.
    pub fn cell_node_ids(&self, cell: [usize; 3]) -> [usize; Self::NODES_PER_CELL] {
        let mut ids = [0; Self::NODES_PER_CELL];

        for (a, signs) in CORNER_SIGNS.iter().enumerate() {
            let corner = [
                cell[0] + (signs[0] > 0.0) as usize,
                cell[1] + (signs[1] > 0.0) as usize,
                cell[2] + (signs[2] > 0.0) as usize,
            ];
            ids[a] = self.node_index(corner);
        }

        ids
    }

    /// Maps a world position into the reference frame `[-1, 1]³` of a cell.
    pub fn map_to_reference(&self, position: &Point<Real>, cell: [usize; 3]) -> Vector<Real> {
        let w = self.cell_width;
        Vector::new(
            2.0 * (position.x - cell[0] as Real * w) / w - 1.0,
            2.0 * (position.y - cell[1] as Real * w) / w - 1.0,
            2.0 * (position.z - cell[2] as Real * w) / w - 1.0,
        )
    }

    /// Trilinear shape-function values at a reference-frame point.
    ///
    /// The values form a partition of unity: they sum to 1 anywhere inside
    /// the cell.
    pub fn shape_values(ref_coords: &Vector<Real>) -> [Real; Self::NODES_PER_CELL] {
        let mut values = [0.0; Self::NODES_PER_CELL];

        for (a, signs) in CORNER_SIGNS.iter().enumerate() {
            values[a] = 0.125
                * (1.0 + signs[0] * ref_coords.x)
                * (1.0 + signs[1] * ref_coords.y)
                * (1.0 + signs[2] * ref_coords.z);
        }

        values
    }

    /// World-coordinate gradients of the shape functions at a reference-frame
    /// point. The gradients sum to zero.
    pub fn shape_gradients(&self, ref_coords: &Vector<Real>) -> [Vector<Real>; Self::NODES_PER_CELL] {
        // d xi / d x for the affine reference map.
        let scale = 2.0 / self.cell_width;
        let mut gradients = [Vector::zeros(); Self::NODES_PER_CELL];

        for (a, signs) in CORNER_SIGNS.iter().enumerate() {
            gradients[a] = Vector::new(
                0.125 * signs[0] * (1.0 + signs[1] * ref_coords.y) * (1.0 + signs[2] * ref_coords.z),
                0.125 * (1.0 + signs[0] * ref_coords.x) * signs[1] * (1.0 + signs[2] * ref_coords.z),
                0.125 * (1.0 + signs[0] * ref_coords.x) * (1.0 + signs[1] * ref_coords.y) * signs[2],
            ) * scale;
        }

        gradients
    }

    /// Number of seed candidates per cell for a given seeding order.
    pub fn particles_per_cell(order: usize) -> usize {
        order * order * order
    }

    /// Volume assigned to each seed candidate of a cell.
    pub fn candidate_volume(&self, order: usize) -> Real {
        self.cell_width.powi(3) / Self::particles_per_cell(order) as Real
    }

    /// Writes the deterministic candidate positions of a cell into `out`.
    ///
    /// Candidates sit at the centers of the `order³` uniform sub-cells, in
    /// x-fastest order.
    pub fn seed_candidates(&self, cell: [usize; 3], order: usize, out: &mut Vec<Point<Real>>) {
        out.clear();

        let w = self.cell_width;
        let spacing = w / order as Real;
        let min = Vector::new(
            cell[0] as Real * w,
            cell[1] as Real * w,
            cell[2] as Real * w,
        );

        for k in 0..order {
            for j in 0..order {
                for i in 0..order {
                    out.push(Point::new(
                        min.x + (i as Real + 0.5) * spacing,
                        min.y + (j as Real + 0.5) * spacing,
                        min.z + (k as Real + 0.5) * spacing,
                    ));
                }
            }
        }
    }

    /// Global indices of all nodes on one boundary face.
    ///
    /// Faces are numbered `0..6` as `-x, +x, -y, +y, -z, +z`.
    pub fn face_nodes(&self, face: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.nodes_per_axis();
        let axis = face / 2;
        let fixed = if face % 2 == 0 { 0 } else { n[axis] - 1 };
        let u_axis = (axis + 1) % 3;
        let v_axis = (axis + 2) % 3;
        let nu = n[u_axis];
        let nv = n[v_axis];

        (0..nu * nv).map(move |f| {
            let mut coords = [0; 3];
            coords[axis] = fixed;
            coords[u_axis] = f % nu;
            coords[v_axis] = f / nu;
            self.node_index(coords)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shape_values_partition_of_unity() {
        let points = [
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(-0.3, 0.7, 0.1),
            Vector::new(1.0, -1.0, 0.5),
        ];

        for p in &points {
            let values = Grid::shape_values(p);
            let sum: Real = values.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1.0e-14);
        }
    }

    #[test]
    fn shape_gradients_sum_to_zero() {
        let grid = Grid::new(4, 4, 4, 0.25);
        let gradients = grid.shape_gradients(&Vector::new(0.2, -0.6, 0.9));
        let sum: Vector<Real> = gradients.iter().sum();
        assert_relative_eq!(sum.norm(), 0.0, epsilon = 1.0e-13);
    }

    #[test]
    fn shape_values_interpolate_corners() {
        // Each shape function is 1 at its own corner and 0 at the others.
        for (a, signs) in CORNER_SIGNS.iter().enumerate() {
            let corner = Vector::new(signs[0], signs[1], signs[2]);
            let values = Grid::shape_values(&corner);

            for (b, value) in values.iter().enumerate() {
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_relative_eq!(*value, expected, epsilon = 1.0e-14);
            }
        }
    }

    #[test]
    fn locate_and_reference_map() {
        let grid = Grid::new(3, 2, 4, 0.5);
        let position = Point::new(1.3, 0.9, 1.75);
        let cell = grid.locate(&position).unwrap();
        assert_eq!(cell, [2, 1, 3]);

        let xi = grid.map_to_reference(&position, cell);
        assert_relative_eq!(xi.x, 0.2, epsilon = 1.0e-12);
        assert_relative_eq!(xi.y, 0.6, epsilon = 1.0e-12);
        assert_relative_eq!(xi.z, 0.0, epsilon = 1.0e-12);

        assert!(grid.locate(&Point::new(-0.1, 0.2, 0.2)).is_none());
        assert!(grid.locate(&Point::new(1.5, 0.2, 0.2)).is_none());
    }

    #[test]
    fn cell_node_ids_match_shape_ordering() {
        let grid = Grid::new(2, 2, 2, 1.0);
        let ids = grid.cell_node_ids([1, 0, 1]);

        // First local node is the cell's lower corner, seventh is the upper.
        assert_eq!(ids[0], grid.node_index([1, 0, 1]));
        assert_eq!(ids[6], grid.node_index([2, 1, 2]));

        // A point at the lower corner must assign all weight to local node 0.
        let xi = Vector::new(-1.0, -1.0, -1.0);
        let values = Grid::shape_values(&xi);
        assert_relative_eq!(values[0], 1.0, epsilon = 1.0e-14);
    }

    #[test]
    fn seeding_is_deterministic_and_conserves_volume() {
        let grid = Grid::new(2, 2, 2, 1.0);
        let order = 2;
        let mut first = Vec::new();
        let mut second = Vec::new();

        grid.seed_candidates([1, 1, 0], order, &mut first);
        grid.seed_candidates([1, 1, 0], order, &mut second);

        assert_eq!(first.len(), Grid::particles_per_cell(order));
        assert_eq!(first, second);

        let total: Real = grid.candidate_volume(order) * first.len() as Real;
        assert_relative_eq!(total, grid.cell_width().powi(3), epsilon = 1.0e-14);

        // All candidates are interior to the cell.
        for c in &first {
            assert_eq!(grid.locate(c).unwrap(), [1, 1, 0]);
        }
    }

    #[test]
    fn face_nodes_cover_boundary_planes() {
        let grid = Grid::new(2, 3, 4, 1.0);

        // -x face: (ny+1) * (nz+1) nodes.
        let nodes: Vec<_> = grid.face_nodes(0).collect();
        assert_eq!(nodes.len(), 4 * 5);

        // +z face: (nx+1) * (ny+1) nodes, occupying the last plane.
        let nodes: Vec<_> = grid.face_nodes(5).collect();
        assert_eq!(nodes.len(), 3 * 4);
        for id in &nodes {
            assert!(*id >= grid.total_nodes() - 3 * 4);
        }
    }
}
