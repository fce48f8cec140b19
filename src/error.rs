//! Simulation-specific error types.
//!
//! Constructors and validation helpers return [`SimResult`] instead of
//! panicking; systems log the error and fall back to a safe state.
//!
//! ## Usage
//!
//! ```rust
//! use elastic_collision::error::{validate_mass_sum, SimResult};
//!
//! fn check(m1: f32, m2: f32) -> SimResult<()> {
//!     validate_mass_sum(m1, m2)?;
//!     Ok(())
//! }
//! assert!(check(2.0, 1.0).is_ok());
//! assert!(check(1.0, -1.0).is_err());
//! ```

use std::fmt;

/// Top-level error enum for the collision simulator.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The elastic collision law divides by `mass1 + mass2`; a zero or
    /// non-finite sum has no meaningful result.
    DegenerateMassSum {
        mass1: f32,
        mass2: f32,
    },

    /// Configuration constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// `assets/collision.toml` exists but could not be parsed.
    ConfigParse {
        path: String,
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DegenerateMassSum { mass1, mass2 } => write!(
                f,
                "mass 1 ({}) + mass 2 ({}) must be a positive finite number",
                mass1, mass2
            ),
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `mass1 + mass2` is strictly positive and finite.
///
/// Individual masses may be zero or negative; only the sum is a divisor.
pub fn validate_mass_sum(mass1: f32, mass2: f32) -> SimResult<()> {
    let sum = mass1 + mass2;
    if sum.is_finite() && sum > 0.0 {
        Ok(())
    } else {
        Err(SimError::DegenerateMassSum { mass1, mass2 })
    }
}

/// Returns an error if `mass1 + mass2` is zero or not finite.
///
/// This is the only condition under which the elastic law is undefined; a
/// negative total still conserves momentum and energy.
pub fn validate_nonzero_mass_sum(mass1: f32, mass2: f32) -> SimResult<()> {
    let sum = mass1 + mass2;
    if sum.is_finite() && sum != 0.0 {
        Ok(())
    } else {
        Err(SimError::DegenerateMassSum { mass1, mass2 })
    }
}

/// Returns an error if `value` is not strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is negative or not finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
