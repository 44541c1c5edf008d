//! Error types for cloth construction and configuration.

use core::fmt;

/// Errors raised when a grid or configuration is rejected.
///
/// Numeric degeneracies inside a step (zero-length springs, zero-area drag
/// triangles) are never reported here; they contribute no force instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Rows and columns must both be at least 1.
    InvalidGridDimensions { rows: usize, cols: usize },
    /// Mass must be positive and finite.
    InvalidMass,
    /// Stiffness must be positive and finite.
    InvalidStiffness,
    /// Damping must be non-negative and finite.
    InvalidDamping,
    /// Rest length must be positive and finite.
    InvalidRestLength,
    /// Lattice spacing must be positive and finite.
    InvalidSpacing,
    /// Sub-step size must be positive and finite.
    InvalidTimeStep,
    /// At least one sub-step must be allowed per tick.
    InvalidSubStepLimit,
    /// Collision skin and restitution must be non-negative and finite.
    InvalidCollisionParameter,
    /// Air density must be non-negative and finite.
    InvalidAirDensity,
    /// A vector parameter (gravity, wind, top) is NaN or infinite.
    NonFiniteParameter(&'static str),
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { rows, cols } => {
                write!(f, "grid must be at least 1x1 (got {} rows, {} cols)", rows, cols)
            }
            ClothError::InvalidMass => write!(f, "mass must be positive and finite"),
            ClothError::InvalidStiffness => write!(f, "stiffness must be positive and finite"),
            ClothError::InvalidDamping => write!(f, "damping must be non-negative and finite"),
            ClothError::InvalidRestLength => write!(f, "rest length must be positive and finite"),
            ClothError::InvalidSpacing => write!(f, "lattice spacing must be positive and finite"),
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::InvalidSubStepLimit => write!(f, "at least one sub-step per tick is required"),
            ClothError::InvalidCollisionParameter => {
                write!(f, "collision skin and restitution must be non-negative and finite")
            }
            ClothError::InvalidAirDensity => write!(f, "air density must be non-negative and finite"),
            ClothError::NonFiniteParameter(name) => write!(f, "{} must be finite", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}
