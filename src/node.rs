//! Point masses of the cloth grid.

use crate::float::Float;
use crate::vec::Vec3;

/// A point mass with explicit position and velocity.
///
/// Mass lives in the configuration, shared by every node of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Node<F: Float> {
    pub position: Vec3<F>,
    pub velocity: Vec3<F>,
}

impl<F: Float> Node<F> {
    pub fn new(position: Vec3<F>, velocity: Vec3<F>) -> Self {
        Node { position, velocity }
    }

    /// A node at rest at `position`.
    pub fn at_rest(position: Vec3<F>) -> Self {
        Node { position, velocity: Vec3::zero() }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
