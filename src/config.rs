//! Cloth configuration: material constants, environment, flags and step control.

use crate::error::ClothError;
use crate::float::Float;
use crate::grid::Lattice;
use crate::vec::Vec3;

/// How the renderer should draw the cloth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Deforming surface with per-vertex normals.
    Textured,
    /// Nodes and structural links only.
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Textured => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Textured,
        }
    }
}

/// Which nodes are held in place while pinning is enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchors {
    /// `(0, 0)` and `(0, W-1)`.
    TopCorners,
    /// Every node of row 0.
    TopRow,
}

impl Anchors {
    /// Flat indices of the anchor nodes for a grid `width` columns wide.
    pub fn indices(self, width: usize) -> alloc::vec::Vec<usize> {
        match self {
            Anchors::TopCorners if width > 1 => alloc::vec![0, width - 1],
            Anchors::TopCorners => alloc::vec![0],
            Anchors::TopRow => (0..width).collect(),
        }
    }
}

/// Configuration for a cloth simulation.
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f64> = ClothConfig::new()
///     .with_stiffness(80.0)
///     .with_damping(4.0)
///     .with_wind(Vec3::new(0.5, 0.0, 0.0))
///     .with_drag(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Spring constant `ks`. Default: 50.
    pub stiffness: F,
    /// Spring damping `kd`. Default: 10.
    pub damping: F,
    /// Mass of every node. Default: 1.
    pub mass: F,
    /// Structural spring rest length. Default: 0.2.
    pub rest_length: F,
    /// Initial column spacing `dx`. Default: 0.2.
    pub spacing_x: F,
    /// Initial row spacing `dy`. Default: 0.2.
    pub spacing_y: F,
    /// Height of row 0 in the initial lattice. Default: 5.
    pub top: F,
    /// Gravitational acceleration. Default: (0, -9.81, 0).
    pub gravity: Vec3<F>,
    /// Wind, added as a force and used as the drag reference velocity. Default: zero.
    pub wind: Vec3<F>,
    /// Air density for aerodynamic drag. Default: 1.225.
    pub air_density: F,
    /// Aerodynamic drag enabled. Default: false.
    pub drag: bool,
    /// Anchor nodes held in place. Default: true.
    pub pinned: bool,
    /// Anchor selection. Default: top corners.
    pub anchors: Anchors,
    /// Default: textured.
    pub render_mode: RenderMode,
    /// Fixed sub-step size. Default: 1e-3.
    pub time_step: F,
    /// Upper bound on sub-steps per tick. Default: 15.
    pub max_sub_steps: usize,
    /// Collision clearance added to obstacle radii. Default: 0.02.
    pub skin: F,
    /// Multiplier on the removed inward velocity; above 1 the node bounces. Default: 1.5.
    pub restitution: F,
    /// Stiffness increment used by stiffness commands. Default: 5.
    pub stiffness_step: F,
    /// Damping increment used by damping commands. Default: 1.
    pub damping_step: F,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            stiffness: F::from_f64(50.0),
            damping: F::from_f64(10.0),
            mass: F::one(),
            rest_length: F::from_f64(0.2),
            spacing_x: F::from_f64(0.2),
            spacing_y: F::from_f64(0.2),
            top: F::from_f64(5.0),
            gravity: Vec3::new(F::zero(), F::from_f64(-9.81), F::zero()),
            wind: Vec3::zero(),
            air_density: F::from_f64(1.225),
            drag: false,
            pinned: true,
            anchors: Anchors::TopCorners,
            render_mode: RenderMode::Textured,
            time_step: F::from_f64(1e-3),
            max_sub_steps: 15,
            skin: F::from_f64(0.02),
            restitution: F::from_f64(1.5),
            stiffness_step: F::from_f64(5.0),
            damping_step: F::one(),
        }
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_rest_length(mut self, rest_length: F) -> Self {
        self.rest_length = rest_length;
        self
    }

    /// Set the initial lattice spacing (`dx` between columns, `dy` between rows).
    pub fn with_spacing(mut self, dx: F, dy: F) -> Self {
        self.spacing_x = dx;
        self.spacing_y = dy;
        self
    }

    pub fn with_top(mut self, top: F) -> Self {
        self.top = top;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_air_density(mut self, air_density: F) -> Self {
        self.air_density = air_density;
        self
    }

    pub fn with_drag(mut self, drag: bool) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_sub_steps(mut self, max_sub_steps: usize) -> Self {
        self.max_sub_steps = max_sub_steps;
        self
    }

    /// Set the collision clearance and bounce multiplier.
    pub fn with_collision(mut self, skin: F, restitution: F) -> Self {
        self.skin = skin;
        self.restitution = restitution;
        self
    }

    /// Set the increments applied by the stiffness and damping commands.
    pub fn with_command_steps(mut self, stiffness_step: F, damping_step: F) -> Self {
        self.stiffness_step = stiffness_step;
        self.damping_step = damping_step;
        self
    }

    /// The initial layout parameters.
    pub fn lattice(&self) -> Lattice<F> {
        Lattice { dx: self.spacing_x, dy: self.spacing_y, top: self.top }
    }

    /// Check every field, reporting the first rule broken.
    pub fn validate(&self) -> Result<(), ClothError> {
        let positive = |v: F| v.is_finite() && v > F::zero();
        let non_negative = |v: F| v.is_finite() && v >= F::zero();

        if !positive(self.stiffness) {
            return Err(ClothError::InvalidStiffness);
        }
        if !non_negative(self.damping) {
            return Err(ClothError::InvalidDamping);
        }
        if !positive(self.mass) {
            return Err(ClothError::InvalidMass);
        }
        if !positive(self.rest_length) {
            return Err(ClothError::InvalidRestLength);
        }
        if !positive(self.spacing_x) || !positive(self.spacing_y) {
            return Err(ClothError::InvalidSpacing);
        }
        if !self.top.is_finite() {
            return Err(ClothError::NonFiniteParameter("top"));
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::NonFiniteParameter("gravity"));
        }
        if !self.wind.is_finite() {
            return Err(ClothError::NonFiniteParameter("wind"));
        }
        if !non_negative(self.air_density) {
            return Err(ClothError::InvalidAirDensity);
        }
        if !positive(self.time_step) {
            return Err(ClothError::InvalidTimeStep);
        }
        if self.max_sub_steps == 0 {
            return Err(ClothError::InvalidSubStepLimit);
        }
        if !non_negative(self.skin) || !non_negative(self.restitution) {
            return Err(ClothError::InvalidCollisionParameter);
        }
        if !positive(self.stiffness_step) {
            return Err(ClothError::InvalidStiffness);
        }
        if !positive(self.damping_step) {
            return Err(ClothError::InvalidDamping);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
