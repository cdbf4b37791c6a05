//! Error types for slot-engine operations.

use thiserror::Error;

/// Boxed error produced by an [`AvailabilitySource`](crate::source::AvailabilitySource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// No known zone currently observes the offset of the instant being formatted.
    #[error("No timezone found for UTC offset {offset_seconds}s")]
    UnresolvedOffset { offset_seconds: i32 },

    #[error("No active event type found with a duration of {duration} minutes")]
    NoMatchingEvent { duration: u32 },

    #[error("Invalid availability payload: {0}")]
    InvalidAvailability(#[from] serde_json::Error),

    #[error("Availability provider error: {0}")]
    Provider(#[source] SourceError),
}

pub type Result<T> = std::result::Result<T, SlotError>;
