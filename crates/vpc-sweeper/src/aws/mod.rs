//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: Default VPC discovery, workload check and teardown calls
//! - STS: Caller identity and cross-account role assumption
//! - Organizations: Active account enumeration
//! - Step Functions: Workflow start

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;
pub mod organizations;
pub mod sfn;

// Core clients
pub use account::{assume_role, get_current_account_id};
pub use context::{AwsContext, FromAwsContext};
pub use ec2::{Ec2Client, VpcOperations};
pub use organizations::OrganizationsClient;
pub use sfn::SfnClient;

// Error handling
pub use error::{AwsError, classify_anyhow_error, classify_aws_error, ignore_not_found};
