//! Per-node force accumulation: gravity, wind, structural springs, drag, pins.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::grid::NodeGrid;
use crate::node::Node;
use crate::par::fill_indexed;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

const DEGENERATE_EPSILON: f64 = 1e-12;

/// Damped structural spring law shared by every grid edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringLaw<F: Float> {
    pub stiffness: F,
    pub damping: F,
    pub rest_length: F,
}

impl<F: Float> SpringLaw<F> {
    pub fn from_config(config: &ClothConfig<F>) -> Self {
        SpringLaw {
            stiffness: config.stiffness,
            damping: config.damping,
            rest_length: config.rest_length,
        }
    }

    /// Force on `a` from the spring joining it to `b`. `b` receives the negation.
    ///
    /// Coincident endpoints give zero force.
    pub fn force(&self, a: &Node<F>, b: &Node<F>) -> Vec3<F> {
        let delta = a.position - b.position;
        let len = delta.length();
        if len.is_near_zero(F::from_f64(DEGENERATE_EPSILON)) {
            return Vec3::zero();
        }
        let axis = delta.scale(F::one() / len);
        let closing = (a.velocity - b.velocity).dot(axis);
        let f = -self.stiffness * (len - self.rest_length) - self.damping * closing;
        axis.scale(f)
    }

    /// Potential energy stored in the spring joining `a` and `b`.
    pub fn elastic_energy(&self, a: &Node<F>, b: &Node<F>) -> F {
        let stretch = a.position.distance(b.position) - self.rest_length;
        F::half() * self.stiffness * stretch * stretch
    }
}

/// Aerodynamic drag on one triangle, before it is split between the vertices.
///
/// Returns zero for triangles whose area is below epsilon.
pub fn triangle_drag<F: Float>(
    positions: [Vec3<F>; 3],
    velocities: [Vec3<F>; 3],
    wind: Vec3<F>,
    air_density: F,
) -> Vec3<F> {
    let third = F::one() / F::from_f64(3.0);
    let relative = (velocities[0] + velocities[1] + velocities[2]).scale(third) - wind;
    let normal = (positions[1] - positions[0]).cross(positions[2] - positions[0]);
    let normal_len = normal.length();
    if normal_len.is_near_zero(F::from_f64(DEGENERATE_EPSILON)) || !normal_len.is_finite() {
        return Vec3::zero();
    }
    let magnitude = -F::half() * air_density * relative.length() * relative.dot(normal)
        / (F::two() * normal_len);
    normal.scale(magnitude)
}

/// Computes the net force on every node of a grid.
///
/// Spring and drag contributions are first evaluated per edge and per
/// triangle, then every node sums the contributions that touch it. No two
/// writers ever share a slot. All buffers are rebuilt on each call.
#[derive(Clone, Debug, Default)]
pub struct ForceAccumulator<F: Float> {
    forces: AllocVec<Vec3<F>>,
    vertical: AllocVec<Vec3<F>>,
    horizontal: AllocVec<Vec3<F>>,
    drag: AllocVec<Vec3<F>>,
}

impl<F: Float> ForceAccumulator<F> {
    pub fn new() -> Self {
        ForceAccumulator {
            forces: AllocVec::new(),
            vertical: AllocVec::new(),
            horizontal: AllocVec::new(),
            drag: AllocVec::new(),
        }
    }

    /// Recompute every node's net force. Nodes listed in `pinned` get zero.
    pub fn accumulate(
        &mut self,
        grid: &NodeGrid<F>,
        config: &ClothConfig<F>,
        pinned: &[usize],
    ) -> &[Vec3<F>] {
        let width = grid.width();
        let height = grid.height();
        let nodes = grid.nodes();
        let spring = SpringLaw::from_config(config);

        // Vertical edge `e` joins upper node `e` to lower node `e + width`.
        reset(&mut self.vertical, (height - 1) * width);
        fill_indexed(&mut self.vertical, |e| spring.force(&nodes[e + width], &nodes[e]));

        // Horizontal edge `r * (width - 1) + c` joins `(r, c)` to `(r, c + 1)`.
        reset(&mut self.horizontal, height * (width - 1));
        fill_indexed(&mut self.horizontal, |e| {
            let right = (e / (width - 1)) * width + e % (width - 1) + 1;
            spring.force(&nodes[right], &nodes[right - 1])
        });

        if config.drag {
            let third = F::one() / F::from_f64(3.0);
            reset(&mut self.drag, 2 * grid.quad_count());
            fill_indexed(&mut self.drag, |t| {
                let quad = t / 2;
                let tri = grid.quad_triangles(quad / (width - 1), quad % (width - 1))[t % 2];
                let f = triangle_drag(
                    tri.map(|i| nodes[i].position),
                    tri.map(|i| nodes[i].velocity),
                    config.wind,
                    config.air_density,
                );
                f.scale(third)
            });
        } else {
            self.drag.clear();
        }

        let base = config.gravity.scale(config.mass) + config.wind;
        let vertical = &self.vertical;
        let horizontal = &self.horizontal;
        let drag = &self.drag;
        reset(&mut self.forces, grid.len());
        fill_indexed(&mut self.forces, |idx| {
            let (r, c) = (idx / width, idx % width);
            let mut f = base;
            if r > 0 {
                f += vertical[idx - width];
            }
            if r + 1 < height {
                f -= vertical[idx];
            }
            if c > 0 {
                f += horizontal[r * (width - 1) + c - 1];
            }
            if c + 1 < width {
                f -= horizontal[r * (width - 1) + c];
            }
            if !drag.is_empty() {
                f += gather_drag(drag, r, c, width, height);
            }
            f
        });

        for &idx in pinned {
            self.forces[idx] = Vec3::zero();
        }
        &self.forces
    }

    /// Forces from the most recent `accumulate` call.
    pub fn forces(&self) -> &[Vec3<F>] {
        &self.forces
    }
}

fn reset<F: Float>(buf: &mut AllocVec<Vec3<F>>, len: usize) {
    buf.clear();
    buf.resize(len, Vec3::zero());
}

/// Sum the per-vertex drag shares of every triangle touching `(r, c)`.
///
/// Triangle `2q` is `(tl, tr, bl)` and `2q + 1` is `(tr, br, bl)` of quad `q`.
fn gather_drag<F: Float>(
    drag: &[Vec3<F>],
    r: usize,
    c: usize,
    width: usize,
    height: usize,
) -> Vec3<F> {
    let quads_per_row = width - 1;
    let quad = |qr: usize, qc: usize| 2 * (qr * quads_per_row + qc);
    let mut f = Vec3::zero();
    let below = r + 1 < height;
    let right = c + 1 < width;
    if below && right {
        // top-left
        f += drag[quad(r, c)];
    }
    if below && c > 0 {
        // top-right
        let q = quad(r, c - 1);
        f += drag[q] + drag[q + 1];
    }
    if r > 0 && right {
        // bottom-left
        let q = quad(r - 1, c);
        f += drag[q] + drag[q + 1];
    }
    if r > 0 && c > 0 {
        // bottom-right
        f += drag[quad(r - 1, c - 1) + 1];
    }
    f
}
