//! Validation Error Types

use thiserror::Error;

/// Errors raised when a reading is rejected at ingest
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of the physically plausible range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
}
