//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors that can occur while scheduling a review.
///
/// Scheduling is pure computation; the only failure mode is an
/// outcome outside the rating domain. Not-found and ownership
/// errors belong to the callers that load and persist cards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("invalid rating {value}: must be between 1 and 5")]
    InvalidRating { value: u8 },
}
