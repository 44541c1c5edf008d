//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Trait abstracting the floating-point operations the cloth solver needs.
///
/// Implemented for `f32` and `f64`. The solver accumulates many small forces
/// per sub-step, so `f64` is the type used throughout the examples.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Send
    + Sync
    + core::fmt::Debug
    + core::fmt::Display
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Floor.
    fn floor(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// `false` for NaN and both infinities.
    fn is_finite(self) -> bool;
    /// Convert from f64 (for constants and configuration).
    fn from_f64(v: f64) -> Self;
    /// Convert a grid coordinate or count.
    fn from_usize(v: usize) -> Self;
    /// Narrow to f32 for renderer buffers.
    fn to_f32(self) -> f32;
    /// Widen to f64 for reports.
    fn to_f64(self) -> f64;
    /// Truncate a non-negative value to a count.
    fn to_usize(self) -> usize;

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn floor(self) -> Self { libm::floorf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn from_usize(v: usize) -> Self { v as f32 }
    fn to_f32(self) -> f32 { self }
    fn to_f64(self) -> f64 { self as f64 }
    fn to_usize(self) -> usize { if self > 0.0 { self as usize } else { 0 } }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn floor(self) -> Self { libm::floor(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn from_f64(v: f64) -> Self { v }
    fn from_usize(v: usize) -> Self { v as f64 }
    fn to_f32(self) -> f32 { self as f32 }
    fn to_f64(self) -> f64 { self }
    fn to_usize(self) -> usize { if self > 0.0 { self as usize } else { 0 } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_usize_truncates_and_saturates_at_zero() {
        assert_eq!(3.9f64.to_usize(), 3);
        assert_eq!((-2.0f64).to_usize(), 0);
        assert_eq!(f64::NAN.to_usize(), 0);
    }

    #[test]
    fn constants_keep_double_precision() {
        assert_eq!(<f64 as Float>::from_f64(1e-3), 1e-3);
        assert_eq!(<f64 as Float>::from_f64(-9.81), -9.81);
        assert_eq!(<f32 as Float>::from_f64(0.2), 0.2f32);
    }

    #[test]
    fn finiteness() {
        assert!(Float::is_finite(1.0f32));
        assert!(!Float::is_finite(f64::INFINITY));
        assert!(!Float::is_finite(f64::NAN));
    }
}
