//! Sphere obstacles and node-vs-sphere collision response.

use crate::float::Float;
use crate::grid::NodeGrid;
use crate::vec::Vec3;

/// A moving sphere supplied by the caller each tick.
///
/// The solver only reads it; moving it is the caller's job.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
    pub velocity: Vec3<F>,
}

impl<F: Float> Obstacle<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Obstacle { center, radius, velocity: Vec3::zero() }
    }

    pub fn with_velocity(mut self, velocity: Vec3<F>) -> Self {
        self.velocity = velocity;
        self
    }

    /// A finite center and a finite, non-negative radius.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius >= F::zero()
    }

    /// Move the center along the current velocity.
    pub fn advance(&mut self, dt: F) {
        self.center += self.velocity.scale(dt);
    }
}

/// Tunable collision response constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionResponse<F: Float> {
    /// Clearance kept between nodes and every obstacle surface.
    pub skin: F,
    /// Multiplier on the removed inward velocity component.
    pub restitution: F,
}

/// Outcome of one collision pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CollisionReport<F: Float> {
    /// Node/obstacle pairs corrected.
    pub contacts: usize,
    /// Deepest penetration below the skinned surface that was corrected.
    pub max_penetration: F,
}

impl<F: Float> CollisionReport<F> {
    pub fn merge(&mut self, other: CollisionReport<F>) {
        self.contacts += other.contacts;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
    }
}

/// Push every node inside `obstacle` (plus skin) back onto its surface.
///
/// Nodes listed in `pinned` are left alone. A node sitting exactly on the
/// center is ejected along +Y. Invalid obstacles (see [`Obstacle::is_valid`])
/// touch nothing.
pub fn resolve_sphere<F: Float>(
    grid: &mut NodeGrid<F>,
    obstacle: &Obstacle<F>,
    response: &CollisionResponse<F>,
    pinned: &[usize],
) -> CollisionReport<F> {
    let mut report = CollisionReport { contacts: 0, max_penetration: F::zero() };
    if !obstacle.is_valid() {
        return report;
    }
    let reach = obstacle.radius + response.skin;
    let reach_sq = reach * reach;

    for (idx, node) in grid.nodes_mut().iter_mut().enumerate() {
        let offset = node.position - obstacle.center;
        let dist_sq = offset.length_sq();
        if dist_sq >= reach_sq || !dist_sq.is_finite() || pinned.contains(&idx) {
            continue;
        }
        let dist = dist_sq.sqrt();
        let normal = offset
            .try_normalize(F::from_f64(1e-12))
            .unwrap_or_else(Vec3::unit_y);

        let inward = node.velocity.dot(normal);
        if inward < F::zero() {
            node.velocity -= normal.scale(response.restitution * inward);
        }
        node.position = obstacle.center + normal.scale(reach);

        report.contacts += 1;
        report.max_penetration = report.max_penetration.max(reach - dist);
    }
    report
}

/// Resolve against every obstacle in order.
pub fn resolve_all<F: Float>(
    grid: &mut NodeGrid<F>,
    obstacles: &[Obstacle<F>],
    response: &CollisionResponse<F>,
    pinned: &[usize],
) -> CollisionReport<F> {
    let mut report = CollisionReport { contacts: 0, max_penetration: F::zero() };
    for obstacle in obstacles {
        report.merge(resolve_sphere(grid, obstacle, response, pinned));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> CollisionResponse<f64> {
        CollisionResponse { skin: 0.1, restitution: 1.5 }
    }

    #[test]
    fn node_outside_is_untouched() {
        let mut grid = NodeGrid::<f64>::new(1, 1).unwrap();
        grid.get_mut(0, 0).position = Vec3::new(0.0, 2.0, 0.0);
        let ball = Obstacle::new(Vec3::zero(), 1.0);
        let report = resolve_sphere(&mut grid, &ball, &response(), &[]);
        assert_eq!(report.contacts, 0);
        assert_eq!(grid.get(0, 0).position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn obstacle_advance_moves_center() {
        let mut ball = Obstacle::new(Vec3::zero(), 1.0f64).with_velocity(Vec3::new(0.0, 0.0, 2.0));
        ball.advance(0.5);
        assert_eq!(ball.center, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn outward_moving_node_keeps_velocity() {
        let mut grid = NodeGrid::<f64>::new(1, 1).unwrap();
        let node = grid.get_mut(0, 0);
        node.position = Vec3::new(0.0, 0.5, 0.0);
        node.velocity = Vec3::new(0.0, 2.0, 0.0);
        let ball = Obstacle::new(Vec3::zero(), 1.0);
        resolve_sphere(&mut grid, &ball, &response(), &[]);
        assert_eq!(grid.get(0, 0).velocity, Vec3::new(0.0, 2.0, 0.0));
        assert!((grid.get(0, 0).position.y - 1.1).abs() < 1e-12);
    }

    #[test]
    fn invalid_obstacles_are_skipped() {
        let mut grid = NodeGrid::<f64>::new(1, 1).unwrap();
        grid.get_mut(0, 0).position = Vec3::new(0.0, 0.5, 0.0);
        for ball in [
            Obstacle::new(Vec3::zero(), -1.0),
            Obstacle::new(Vec3::zero(), f64::NAN),
            Obstacle::new(Vec3::new(f64::INFINITY, 0.0, 0.0), 1.0),
        ] {
            let report = resolve_sphere(&mut grid, &ball, &response(), &[]);
            assert_eq!(report.contacts, 0, "{:?}", ball);
            assert_eq!(grid.get(0, 0).position, Vec3::new(0.0, 0.5, 0.0));
        }
    }
}
