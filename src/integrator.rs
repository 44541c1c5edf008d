//! Semi-implicit (symplectic) Euler integration.

use crate::float::Float;
use crate::grid::NodeGrid;
use crate::node::Node;
use crate::par::zip_for_each;
use crate::vec::Vec3;

/// Advance one node: velocity from force first, then position from the new velocity.
pub fn integrate_node<F: Float>(node: &mut Node<F>, force: Vec3<F>, inv_mass: F, dt: F) {
    node.velocity += force.scale(inv_mass * dt);
    node.position += node.velocity.scale(dt);
}

/// Advance every node of `grid` by `dt` under `forces` (one per node).
///
/// Nodes in `pinned` are stopped before the update so they stay exactly where
/// they are, whatever velocity they carried when the pin was engaged.
///
/// # Panics
/// If `forces.len() != grid.len()`.
pub fn semi_implicit_euler<F: Float>(
    grid: &mut NodeGrid<F>,
    forces: &[Vec3<F>],
    mass: F,
    dt: F,
    pinned: &[usize],
) {
    assert_eq!(forces.len(), grid.len(), "one force per node required");
    let nodes = grid.nodes_mut();
    for &idx in pinned {
        nodes[idx].velocity = Vec3::zero();
    }
    let inv_mass = F::one() / mass;
    zip_for_each(nodes, forces, |node, &force| integrate_node(node, force, inv_mass, dt));
}
