//! Errors raised by the reorder engine

use thiserror::Error;

/// Fatal conditions of a reorder run. There is no partial-result policy:
/// any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// A location could not be percent-decoded
    #[error("failed to decode location '{location}': {reason}")]
    Decode { location: String, reason: String },

    /// The reordered sequence lost or gained entries
    #[error("reordered sequence has {actual} locations, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
