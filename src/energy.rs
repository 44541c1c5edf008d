//! Mechanical energy of a cloth state.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::force::SpringLaw;
use crate::grid::NodeGrid;

/// Energy split by source. Gravitational energy is measured from `y = 0`
/// along `-gravity`, so it can be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Energy<F: Float> {
    pub kinetic: F,
    pub elastic: F,
    pub gravitational: F,
}

impl<F: Float> Energy<F> {
    /// Measure the energy of `grid` under `config`.
    pub fn of(grid: &NodeGrid<F>, config: &ClothConfig<F>) -> Self {
        let spring = SpringLaw::from_config(config);
        let nodes = grid.nodes();
        let width = grid.width();
        let mut energy = Energy { kinetic: F::zero(), elastic: F::zero(), gravitational: F::zero() };

        for (idx, node) in nodes.iter().enumerate() {
            energy.kinetic = energy.kinetic
                + F::half() * config.mass * node.velocity.length_sq();
            energy.gravitational = energy.gravitational
                - config.mass * config.gravity.dot(node.position);
            if idx >= width {
                energy.elastic = energy.elastic + spring.elastic_energy(node, &nodes[idx - width]);
            }
            if idx % width > 0 {
                energy.elastic = energy.elastic + spring.elastic_energy(node, &nodes[idx - 1]);
            }
        }
        energy
    }

    pub fn total(&self) -> F {
        self.kinetic + self.elastic + self.gravitational
    }
}
