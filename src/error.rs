//! Error types for the scoring services

use thiserror::Error;

/// Rejection for score requests that fail field validation.
///
/// The `Display` text is the exact error body the HTTP surface returns.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing required transaction fields.")]
pub struct MissingFieldsError;

/// Failure while handling a single stream record.
///
/// These never escape the consume loop; the offending record is logged and
/// skipped.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid transaction record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to publish scored transaction: {0}")]
    Publish(String),
}
