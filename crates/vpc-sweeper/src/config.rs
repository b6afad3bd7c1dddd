//! Lambda handler configuration read from environment variables

use thiserror::Error;
use vpc_sweeper_common::defaults::{
    DEFAULT_MANAGEMENT_REGION, ENV_DRY_RUN, ENV_ROLE_TO_ASSUME, ENV_STATE_MACHINE_ARN,
};

/// Environment variable the Lambda runtime sets to the function's region
pub const ENV_AWS_REGION: &str = "AWS_REGION";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} is empty")]
    Empty(&'static str),

    #[error("environment variable {name} must be a boolean, got {value:?}")]
    InvalidBool { name: &'static str, value: String },
}

/// Settings of the teardown handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownConfig {
    /// Name of the role assumed in each member account
    pub role_to_assume: String,
    /// Region used for the STS call
    pub region: String,
    pub dry_run: bool,
}

impl TeardownConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            role_to_assume: required(&lookup, ENV_ROLE_TO_ASSUME)?,
            region: region(&lookup),
            dry_run: flag(&lookup, ENV_DRY_RUN)?,
        })
    }
}

/// Settings of the trigger handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfig {
    pub state_machine_arn: String,
    /// Management region for Organizations, EC2 and Step Functions calls
    pub region: String,
}

impl TriggerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            state_machine_arn: required(&lookup, ENV_STATE_MACHINE_ARN)?,
            region: region(&lookup),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or(ConfigError::Missing(name))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(value.to_string())
}

fn region(lookup: &impl Fn(&str) -> Option<String>) -> String {
    lookup(ENV_AWS_REGION)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_MANAGEMENT_REGION.to_string())
}

/// Unset or empty means false
fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::InvalidBool { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_teardown_config() {
        let config = TeardownConfig::from_lookup(env(&[
            ("ROLE_TO_ASSUME", " VpcCleanupRole "),
            ("AWS_REGION", "eu-west-1"),
            ("DRY_RUN", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.role_to_assume, "VpcCleanupRole");
        assert_eq!(config.region, "eu-west-1");
        assert!(config.dry_run);
    }

    #[test]
    fn test_teardown_config_defaults() {
        let config = TeardownConfig::from_lookup(env(&[("ROLE_TO_ASSUME", "Role")])).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_missing_and_empty_values() {
        assert_eq!(
            TeardownConfig::from_lookup(env(&[])),
            Err(ConfigError::Missing("ROLE_TO_ASSUME"))
        );
        assert_eq!(
            TriggerConfig::from_lookup(env(&[("STATE_MACHINE_ARN", "  ")])),
            Err(ConfigError::Empty("STATE_MACHINE_ARN"))
        );
    }

    #[test]
    fn test_invalid_dry_run() {
        let err = TeardownConfig::from_lookup(env(&[
            ("ROLE_TO_ASSUME", "Role"),
            ("DRY_RUN", "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "environment variable DRY_RUN must be a boolean, got \"maybe\""
        );
    }

    #[test]
    fn test_trigger_config() {
        let arn = "arn:aws:states:us-east-1:111122223333:stateMachine:remove-default-vpcs";
        let config = TriggerConfig::from_lookup(env(&[("STATE_MACHINE_ARN", arn)])).unwrap();
        assert_eq!(config.state_machine_arn, arn);
        assert_eq!(config.region, "us-east-1");
    }
}
