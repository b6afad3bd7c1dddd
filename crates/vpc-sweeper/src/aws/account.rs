//! AWS account identity and cross-account role assumption

use crate::aws::context::AwsContext;
use crate::aws::error::AwsError;
use anyhow::{Context, Result};
use aws_credential_types::Credentials;
use std::time::SystemTime;
use tracing::info;
use vpc_sweeper_common::AccountId;
use vpc_sweeper_common::defaults::{role_arn, session_name};

/// Fetch the current AWS account ID from credentials via STS GetCallerIdentity
///
/// This operation requires no special permissions - it always succeeds if
/// credentials are valid.
pub async fn get_current_account_id(ctx: &AwsContext) -> Result<AccountId> {
    let identity = ctx
        .sts_client()
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| AwsError::from_sdk(&e))
        .context("Failed to get AWS caller identity - check credentials")?;

    let account = identity
        .account()
        .context("No account ID returned from STS GetCallerIdentity")?;

    info!(account_id = %account, "AWS account validated");

    Ok(AccountId::parse(account)?)
}

/// Assume `role_name` in the target account and return its temporary credentials.
///
/// The session name embeds the account id so CloudTrail entries in the
/// member account show which sweep touched it.
pub async fn assume_role(
    ctx: &AwsContext,
    account_id: &AccountId,
    role_name: &str,
) -> Result<Credentials> {
    let arn = role_arn(account_id, role_name);
    let session = session_name(account_id);

    let output = ctx
        .sts_client()
        .assume_role()
        .role_arn(&arn)
        .role_session_name(&session)
        .send()
        .await
        .map_err(|e| AwsError::from_sdk(&e))
        .with_context(|| format!("Failed to assume role {arn}"))?;

    let creds = output
        .credentials()
        .with_context(|| format!("No credentials returned when assuming {arn}"))?;

    info!(account_id = %account_id, role_arn = %arn, "Assumed cross-account role");

    Ok(Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        Some(creds.session_token().to_string()),
        SystemTime::try_from(*creds.expiration()).ok(),
        "AssumeRole",
    ))
}
