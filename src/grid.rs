//! Dense row-major grid of cloth nodes.

use crate::error::ClothError;
use crate::float::Float;
use crate::node::Node;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Orientation of the initial lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Hangs in the XY plane, row 0 on top: `(c*dx, top - r*dy, 0)`.
    Vertical,
    /// Lies flat in the XZ plane at height `top`: `(c*dx, top, r*dy)`.
    Horizontal,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// Spacing and placement of the initial lattice.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lattice<F: Float> {
    pub dx: F,
    pub dy: F,
    pub top: F,
}

impl<F: Float> Lattice<F> {
    /// Initial position of node `(row, col)`.
    pub fn position(&self, orientation: Orientation, row: usize, col: usize) -> Vec3<F> {
        let x = F::from_usize(col) * self.dx;
        let along = F::from_usize(row) * self.dy;
        match orientation {
            Orientation::Vertical => Vec3::new(x, self.top - along, F::zero()),
            Orientation::Horizontal => Vec3::new(x, self.top, along),
        }
    }
}

/// A `height x width` block of nodes. Node `(row, col)` has flat index `row * width + col`.
///
/// The size never changes after construction; a topology change builds a new grid.
#[derive(Clone, Debug)]
pub struct NodeGrid<F: Float> {
    nodes: AllocVec<Node<F>>,
    width: usize,
    height: usize,
}

impl<F: Float> NodeGrid<F> {
    /// Create a grid with every node at rest at the origin.
    pub fn new(height: usize, width: usize) -> Result<Self, ClothError> {
        if height == 0 || width == 0 {
            return Err(ClothError::InvalidGridDimensions { rows: height, cols: width });
        }
        let count = height
            .checked_mul(width)
            .ok_or(ClothError::InvalidGridDimensions { rows: height, cols: width })?;
        Ok(NodeGrid {
            nodes: alloc::vec![Node::default(); count],
            width,
            height,
        })
    }

    /// Create a grid already laid out as `lattice` in `orientation`.
    pub fn with_layout(
        height: usize,
        width: usize,
        orientation: Orientation,
        lattice: &Lattice<F>,
    ) -> Result<Self, ClothError> {
        let mut grid = Self::new(height, width)?;
        grid.reset_layout(orientation, lattice);
        Ok(grid)
    }

    /// Flat index of `(row, col)`.
    ///
    /// # Panics
    /// If `row >= height` or `col >= width`.
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "node ({}, {}) out of range for {}x{} grid",
            row, col, self.height, self.width,
        );
        row * self.width + col
    }

    pub fn get(&self, row: usize, col: usize) -> &Node<F> {
        &self.nodes[self.index(row, col)]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Node<F> {
        let idx = self.index(row, col);
        &mut self.nodes[idx]
    }

    /// Move every node onto the lattice and stop it.
    pub fn reset_layout(&mut self, orientation: Orientation, lattice: &Lattice<F>) {
        let width = self.width;
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            let pos = lattice.position(orientation, idx / width, idx % width);
            *node = Node::at_rest(pos);
        }
    }

    /// The two triangles of the quad whose top-left node is `(row, col)`,
    /// as flat indices: `(tl, tr, bl)` and `(tr, br, bl)`.
    ///
    /// Valid for `row < height - 1`, `col < width - 1`.
    pub fn quad_triangles(&self, row: usize, col: usize) -> [[usize; 3]; 2] {
        let tl = self.index(row, col);
        let tr = tl + 1;
        let bl = tl + self.width;
        let br = bl + 1;
        debug_assert!(col + 1 < self.width && row + 1 < self.height);
        [[tl, tr, bl], [tr, br, bl]]
    }

    /// Number of quads: `(height - 1) * (width - 1)`.
    pub fn quad_count(&self) -> usize {
        (self.height - 1) * (self.width - 1)
    }

    pub fn nodes(&self) -> &[Node<F>] { &self.nodes }
    pub fn nodes_mut(&mut self) -> &mut [Node<F>] { &mut self.nodes }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> Lattice<f64> {
        Lattice { dx: 1.0, dy: 0.5, top: 5.0 }
    }

    #[test]
    fn correct_node_count() {
        let grid = NodeGrid::<f64>::new(3, 4).unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.quad_count(), 6);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            NodeGrid::<f64>::new(0, 4).unwrap_err(),
            ClothError::InvalidGridDimensions { rows: 0, cols: 4 },
        );
        assert!(NodeGrid::<f64>::new(4, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn column_overflow_does_not_wrap() {
        let grid = NodeGrid::<f64>::new(3, 4).unwrap();
        let _ = grid.get(0, 4);
    }

    #[test]
    fn horizontal_layout_lies_flat() {
        let grid = NodeGrid::with_layout(2, 3, Orientation::Horizontal, &lattice()).unwrap();
        assert_eq!(grid.get(1, 2).position, Vec3::new(2.0, 5.0, 0.5));
    }

    #[test]
    fn quad_triangle_indices() {
        let grid = NodeGrid::<f64>::new(3, 4).unwrap();
        assert_eq!(grid.quad_triangles(1, 2), [[6, 7, 10], [7, 11, 10]]);
    }
}
