//! Input validation errors
//!
//! Typed errors for malformed invocation payloads and notification events.

use thiserror::Error;

/// Errors raised while interpreting an invocation payload
#[derive(Debug, Error)]
pub enum EventError {
    /// Account ID was empty after trimming quotes and whitespace
    #[error("account id cannot be empty")]
    EmptyAccountId,

    /// Account ID was not 12 ASCII digits
    #[error("invalid account id {0:?}: expected 12 digits")]
    InvalidAccountId(String),

    /// Notification envelope contained no records
    #[error("notification envelope has no records")]
    NoRecords,

    /// Account-creation detail did not carry an account id
    #[error("account creation event is missing {0}")]
    MissingField(&'static str),

    /// Payload or message was not valid JSON for the expected shape
    #[error("Failed to parse event: {0}")]
    Parse(#[from] serde_json::Error),
}
