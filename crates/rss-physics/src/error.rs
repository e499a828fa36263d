//! Physics Error Types

use thiserror::Error;

/// Precondition violations of the kinematic calculations
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    /// Input is non-finite or outside its legal range
    #[error("{field} value {value} is not a valid {kind}")]
    InvalidInput {
        field: &'static str,
        kind: &'static str,
        value: f64,
    },

    /// Deceleration magnitude too small to ever stop
    #[error("deceleration {value} must be at least {min}")]
    InvalidDeceleration { value: f64, min: f64 },

    /// Longitudinal speed of an upright vehicle is never negative
    #[error("longitudinal speed {0} must not be negative")]
    NegativeLongitudinalSpeed(f64),

    /// Distance to cover is negative
    #[error("distance to cover {0} must not be negative")]
    NegativeDistance(f64),

    /// Result left the legal range of its quantity
    #[error("{kind} result {value} is out of range")]
    ResultOutOfRange { kind: &'static str, value: f64 },
}
