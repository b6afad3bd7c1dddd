//! Default configuration values shared between the CLI and the Lambda handlers
//!
//! These constants keep names, environment keys and fallbacks consistent
//! across every vpc-sweeper entry point.

/// Region used for management-account calls when none is configured
pub const DEFAULT_MANAGEMENT_REGION: &str = "us-east-1";

/// Environment variable holding the cross-account role name
pub const ENV_ROLE_TO_ASSUME: &str = "ROLE_TO_ASSUME";

/// Environment variable holding the Step Functions state machine ARN
pub const ENV_STATE_MACHINE_ARN: &str = "STATE_MACHINE_ARN";

/// Environment variable enabling dry-run teardown in the Lambda handler
pub const ENV_DRY_RUN: &str = "DRY_RUN";

/// Prefix of every Step Functions execution name started by the trigger
pub const EXECUTION_NAME_PREFIX: &str = "remove-default-vpcs-job";

/// Inclusive range of the random suffix appended to execution names
pub const EXECUTION_SUFFIX_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Prefix of the STS session name used when assuming the cross-account role
pub const SESSION_NAME_PREFIX: &str = "cross_acct_remove_default_vpcs";

/// Literal that selects every active account in the organization
pub const ALL_ACCOUNTS: &str = "ALL";

/// Name EC2 gives the security group it creates with every VPC
pub const DEFAULT_SECURITY_GROUP_NAME: &str = "default";

/// Format an execution name from its numeric suffix
pub fn execution_name(suffix: u32) -> String {
    format!("{EXECUTION_NAME_PREFIX}-{suffix}")
}

/// Format the STS role session name for an account
pub fn session_name(account_id: &str) -> String {
    format!("{SESSION_NAME_PREFIX}_{account_id}")
}

/// Format the ARN of the cross-account role in the target account
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_name() {
        assert_eq!(execution_name(123456), "remove-default-vpcs-job-123456");
    }

    #[test]
    fn test_session_name() {
        assert_eq!(
            session_name("111122223333"),
            "cross_acct_remove_default_vpcs_111122223333"
        );
    }

    #[test]
    fn test_role_arn() {
        assert_eq!(
            role_arn("111122223333", "VpcCleanupRole"),
            "arn:aws:iam::111122223333:role/VpcCleanupRole"
        );
    }

    #[test]
    fn test_execution_suffix_is_six_digits() {
        assert_eq!(EXECUTION_SUFFIX_RANGE.start().to_string().len(), 6);
        assert_eq!(EXECUTION_SUFFIX_RANGE.end().to_string().len(), 6);
    }
}
