//! vpc-sweeper-common - Shared types and utilities
//!
//! This crate provides the types shared by the CLI and both Lambda handlers,
//! without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`account`]: Account IDs and `ALL`/single account selection
//! - [`defaults`]: Default configuration values and naming helpers
//! - [`error`]: Payload validation errors
//! - [`event`]: Trigger invocation parsing (direct and SNS)
//! - [`payload`]: Step Functions workflow payloads
//! - [`resource_kind`]: VPC resource kinds and teardown ordering

pub mod account;
pub mod defaults;
pub mod error;
pub mod event;
pub mod payload;
pub mod resource_kind;

// Re-export commonly used types
pub use account::{AccountId, AccountSelector};
pub use error::EventError;
pub use event::{TriggerInput, TriggerRequest, parse_trigger_event};
pub use payload::{ExecutionInput, TeardownInput};
pub use resource_kind::ResourceKind;
