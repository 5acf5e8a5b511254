//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Month outside 1-12
    #[error("Month {0} is not between 1 and 12")]
    InvalidMonth(u32),

    /// Value is NaN or infinite
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
