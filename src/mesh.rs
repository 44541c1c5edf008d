//! Renderer-facing cloth topology: triangles, wireframe links, texture
//! coordinates and per-vertex normals.

use crate::float::Float;
use crate::grid::NodeGrid;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Index data describing a `rows x cols` cloth.
///
/// Built once per grid size; node positions change every frame, this does not.
#[derive(Clone, Debug, PartialEq)]
pub struct ClothTopology {
    rows: usize,
    cols: usize,
    triangles: AllocVec<[u32; 3]>,
    links: AllocVec<[u32; 2]>,
    tex_coords: AllocVec<[f32; 2]>,
}

impl ClothTopology {
    /// Build the topology of `grid`.
    ///
    /// Triangles follow [`NodeGrid::quad_triangles`] order, two per quad.
    pub fn new<F: Float>(grid: &NodeGrid<F>) -> Self {
        let (rows, cols) = (grid.height(), grid.width());

        let mut triangles = AllocVec::with_capacity(2 * grid.quad_count());
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                for tri in grid.quad_triangles(row, col) {
                    triangles.push(tri.map(|i| i as u32));
                }
            }
        }

        let mut links = AllocVec::with_capacity((rows - 1) * cols + rows * (cols - 1));
        // Vertical
        for row in 1..rows {
            for col in 0..cols {
                links.push([grid.index(row - 1, col) as u32, grid.index(row, col) as u32]);
            }
        }
        // Horizontal
        for row in 0..rows {
            for col in 1..cols {
                links.push([grid.index(row, col - 1) as u32, grid.index(row, col) as u32]);
            }
        }

        let span = |n: usize, i: usize| if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
        let mut tex_coords = AllocVec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                tex_coords.push([span(cols, col), span(rows, row)]);
            }
        }

        ClothTopology { rows, cols, triangles, links, tex_coords }
    }

    /// Area-weighted vertex normals of the current surface.
    ///
    /// Vertices touched by no non-degenerate triangle get a zero normal.
    pub fn vertex_normals<F: Float>(&self, grid: &NodeGrid<F>) -> AllocVec<Vec3<F>> {
        debug_assert_eq!((grid.height(), grid.width()), (self.rows, self.cols));
        let nodes = grid.nodes();
        let mut normals = alloc::vec![Vec3::zero(); nodes.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| i as usize);
            let face = (nodes[b].position - nodes[a].position)
                .cross(nodes[c].position - nodes[a].position);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in normals.iter_mut() {
            *n = n.normalize_or_zero();
        }
        normals
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn triangles(&self) -> &[[u32; 3]] { &self.triangles }
    pub fn links(&self) -> &[[u32; 2]] { &self.links }
    pub fn tex_coords(&self) -> &[[f32; 2]] { &self.tex_coords }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Lattice, Orientation};

    #[test]
    fn counts_for_four_by_three() {
        let grid = NodeGrid::<f64>::new(3, 4).unwrap();
        let topo = ClothTopology::new(&grid);
        assert_eq!(topo.triangles().len(), 12); // (3-1)*(4-1)*2
        assert_eq!(topo.links().len(), 17); // 4*2 vertical + 3*3 horizontal
        assert_eq!(topo.tex_coords().len(), 12);
        assert_eq!(topo.tex_coords()[11], [1.0, 1.0]);
    }

    #[test]
    fn single_row_has_links_but_no_triangles() {
        let grid = NodeGrid::<f64>::new(1, 5).unwrap();
        let topo = ClothTopology::new(&grid);
        assert!(topo.triangles().is_empty());
        assert_eq!(topo.links().len(), 4);
        assert_eq!(topo.tex_coords()[4], [1.0, 0.0]);
    }

    #[test]
    fn flat_vertical_sheet_normals_point_along_z() {
        let lattice = Lattice { dx: 1.0, dy: 1.0, top: 0.0 };
        let grid = NodeGrid::<f64>::with_layout(3, 3, Orientation::Vertical, &lattice).unwrap();
        let topo = ClothTopology::new(&grid);
        for n in topo.vertex_normals(&grid) {
            assert!((n.z.abs() - 1.0).abs() < 1e-12, "normal {:?}", n);
        }
    }
}
