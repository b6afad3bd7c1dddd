//! vpc-sweeper - default VPC removal across an AWS organization
//!
//! This crate provides the teardown of a single account's default VPCs, the
//! trigger that starts the organization-wide workflow, and the CLI and
//! Lambda entry points around them.

pub mod aws;
pub mod config;
pub mod logging;
pub mod teardown;
pub mod trigger;
