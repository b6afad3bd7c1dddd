//! AWS Organizations account enumeration

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::AwsError;
use anyhow::{Context, Result};
use aws_sdk_organizations::Client;
use aws_sdk_organizations::types::{Account, AccountStatus};
use tracing::debug;
use vpc_sweeper_common::AccountId;

/// Organizations client for the management account
pub struct OrganizationsClient {
    client: Client,
}

impl FromAwsContext for OrganizationsClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.organizations_client(),
        }
    }
}

impl OrganizationsClient {
    /// Every ACTIVE account in the organization, sorted by ID
    pub async fn list_active_account_ids(&self) -> Result<Vec<AccountId>> {
        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_accounts()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| AwsError::from_sdk(&e))
                .context("Failed to list organization accounts")?;

            accounts.extend(response.accounts().iter().cloned());

            // Handle pagination
            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        let ids = active_sorted(&accounts)?;
        debug!(
            listed = accounts.len(),
            active = ids.len(),
            "Listed active organization accounts"
        );
        Ok(ids)
    }
}

/// IDs of the ACTIVE accounts, sorted
fn active_sorted(accounts: &[Account]) -> Result<Vec<AccountId>> {
    let mut ids = accounts
        .iter()
        .filter(|a| a.status() == Some(&AccountStatus::Active))
        .filter_map(|a| a.id())
        .map(AccountId::parse)
        .collect::<Result<Vec<_>, _>>()
        .context("Organizations returned a malformed account id")?;

    ids.sort();
    Ok(ids)
}
