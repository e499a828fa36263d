//! World Input Error Types

use thiserror::Error;

/// Invalid vehicle or situation input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// A field violates its constraint
    #[error("{field} value {value} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Fail with [`WorldError::InvalidField`] unless `condition` holds
pub(crate) fn require(
    condition: bool,
    field: &'static str,
    value: f64,
    reason: &'static str,
) -> Result<(), WorldError> {
    if condition {
        Ok(())
    } else {
        Err(WorldError::InvalidField { field, value, reason })
    }
}
