//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the formula pipeline moves
//! between. They are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## US Customary Units
//!
//! Conveyor inputs arrive in the units the shop floor uses:
//! - Length: inches (in), feet (ft)
//! - Weight / force: pounds (lb), treated as lbf at standard gravity
//! - Torque: inch-pounds (in-lbf), foot-pounds (ft-lbf)
//! - Speed: feet per minute (fpm), revolutions per minute (rpm)
//!
//! Each quantity is converted exactly once, at the point the formula needs
//! the other unit. Conversions go through `From` so a second conversion of
//! the same value shows up as a type error rather than a silent ×12.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::units::{Feet, Inches};
//!
//! let length = Inches(120.0);
//! let feet: Feet = length.into();
//! assert_eq!(feet.0, 10.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds-force (weights at standard gravity)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lbf(pub f64);

// ============================================================================
// Torque Units
// ============================================================================

/// Torque in inch-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InLbf(pub f64);

/// Torque in foot-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLbf(pub f64);

impl From<InLbf> for FtLbf {
    fn from(inlbf: InLbf) -> Self {
        FtLbf(inlbf.0 / 12.0)
    }
}

impl From<FtLbf> for InLbf {
    fn from(ftlbf: FtLbf) -> Self {
        InLbf(ftlbf.0 * 12.0)
    }
}

// ============================================================================
// Speed Units
// ============================================================================

/// Linear speed in feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fpm(pub f64);

/// Linear speed in inches per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ipm(pub f64);

impl From<Fpm> for Ipm {
    fn from(fpm: Fpm) -> Self {
        Ipm(fpm.0 * 12.0)
    }
}

/// Rotational speed in revolutions per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rpm(pub f64);

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Feet {
    /// Rectangular area of two lengths
    pub fn area(self, other: Feet) -> SqFt {
        SqFt(self.0 * other.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Inches);
impl_arithmetic!(Feet);
impl_arithmetic!(Lbf);
impl_arithmetic!(InLbf);
impl_arithmetic!(FtLbf);
impl_arithmetic!(Fpm);
impl_arithmetic!(Ipm);
impl_arithmetic!(Rpm);
impl_arithmetic!(SqFt);
