//! Workflow trigger
//!
//! Turns a trigger invocation (a direct `{"AccountId": ...}` call or an
//! account-creation notification) into one Step Functions execution whose
//! input lists the target accounts and every enabled region.

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::{Ec2Client, OrganizationsClient, SfnClient};
use anyhow::{Context, Result};
use rand::Rng;
use serde_json::Value;
use tracing::{info, warn};
use vpc_sweeper_common::defaults::{EXECUTION_SUFFIX_RANGE, execution_name};
use vpc_sweeper_common::{
    AccountId, AccountSelector, ExecutionInput, TriggerRequest, parse_trigger_event,
};

/// AWS calls the trigger depends on, mockable in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait TriggerBackend: Send + Sync {
    /// Every ACTIVE account of the organization, sorted by ID
    async fn list_active_account_ids(&self) -> Result<Vec<AccountId>>;

    /// Regions enabled for the management account
    async fn list_regions(&self) -> Result<Vec<String>>;

    /// Start the teardown workflow and return the execution ARN
    async fn start_execution(&self, name: &str, input: &ExecutionInput) -> Result<String>;
}

/// What a trigger invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A workflow execution was started
    Started {
        execution_name: String,
        execution_arn: String,
        input: ExecutionInput,
    },
    /// The notification carried no account details; nothing to do
    NoAccountDetails,
}

/// Handle one trigger invocation end to end.
pub async fn run_trigger<B: TriggerBackend>(backend: &B, event: Value) -> Result<TriggerOutcome> {
    let selector = match parse_trigger_event(event).context("Malformed trigger event")? {
        TriggerRequest::Accounts(selector) => selector,
        TriggerRequest::NoAccountDetails => {
            info!("No account details available");
            return Ok(TriggerOutcome::NoAccountDetails);
        }
    };

    let input = resolve_execution_input(backend, &selector).await?;
    let (execution_name, execution_arn) = start_workflow(backend, &input).await?;

    Ok(TriggerOutcome::Started {
        execution_name,
        execution_arn,
        input,
    })
}

/// Resolve the selector to account IDs and attach the enabled regions.
///
/// A region-listing failure is logged and leaves the region list empty.
pub async fn resolve_execution_input<B: TriggerBackend>(
    backend: &B,
    selector: &AccountSelector,
) -> Result<ExecutionInput> {
    let account_ids = match selector {
        AccountSelector::All => backend
            .list_active_account_ids()
            .await
            .context("Failed to resolve ALL to organization accounts")?,
        AccountSelector::Single(id) => vec![id.clone()],
    };

    let regions = match backend.list_regions().await {
        Ok(regions) => regions,
        Err(e) => {
            warn!(error = %e, "Failed to list regions, continuing with none");
            Vec::new()
        }
    };

    info!(
        accounts = account_ids.len(),
        regions = regions.len(),
        "Resolved teardown scope"
    );

    Ok(ExecutionInput {
        account_ids,
        regions,
    })
}

/// Start an execution under a fresh random name; returns `(name, arn)`.
pub async fn start_workflow<B: TriggerBackend>(
    backend: &B,
    input: &ExecutionInput,
) -> Result<(String, String)> {
    let name = execution_name(rand::thread_rng().gen_range(EXECUTION_SUFFIX_RANGE));
    info!(execution_name = %name, accounts = input.account_ids.len(), "Starting teardown workflow");

    let arn = backend.start_execution(&name, input).await?;
    Ok((name, arn))
}

/// [`TriggerBackend`] backed by the management account's AWS clients
pub struct AwsTriggerBackend {
    ec2: Ec2Client,
    organizations: OrganizationsClient,
    sfn: SfnClient,
    state_machine_arn: Option<String>,
}

impl FromAwsContext for AwsTriggerBackend {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            ec2: Ec2Client::from_context(ctx),
            organizations: OrganizationsClient::from_context(ctx),
            sfn: SfnClient::from_context(ctx),
            state_machine_arn: None,
        }
    }
}

impl AwsTriggerBackend {
    /// Set the state machine that `start_execution` targets
    pub fn with_state_machine(mut self, arn: impl Into<String>) -> Self {
        self.state_machine_arn = Some(arn.into());
        self
    }
}

impl TriggerBackend for AwsTriggerBackend {
    async fn list_active_account_ids(&self) -> Result<Vec<AccountId>> {
        self.organizations.list_active_account_ids().await
    }

    async fn list_regions(&self) -> Result<Vec<String>> {
        Ok(self.ec2.list_regions().await?)
    }

    async fn start_execution(&self, name: &str, input: &ExecutionInput) -> Result<String> {
        let arn = self
            .state_machine_arn
            .as_deref()
            .context("No state machine ARN configured")?;
        let payload = input
            .to_json()
            .context("Failed to serialize execution input")?;

        self.sfn.start_execution(arn, name, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;
    use serde_json::json;

    fn account(id: &str) -> AccountId {
        AccountId::parse(id).unwrap()
    }

    fn regions() -> Vec<String> {
        vec!["us-east-1".to_string(), "eu-west-1".to_string()]
    }

    #[tokio::test]
    async fn test_single_account_starts_workflow() {
        let mut backend = MockTriggerBackend::new();
        backend.expect_list_active_account_ids().never();
        backend.expect_list_regions().returning(|| Ok(regions()));
        backend
            .expect_start_execution()
            .withf(|name, input| {
                name.starts_with("remove-default-vpcs-job-")
                    && input.account_ids == [AccountId::parse("111122223333").unwrap()]
                    && input.regions == ["us-east-1", "eu-west-1"]
            })
            .times(1)
            .returning(|_, _| Ok("arn:aws:states:us-east-1:1:execution:sm:run".to_string()));

        let outcome = run_trigger(&backend, json!({"AccountId": "111122223333"}))
            .await
            .unwrap();

        match outcome {
            TriggerOutcome::Started {
                execution_name,
                execution_arn,
                ..
            } => {
                let suffix: u32 = execution_name
                    .strip_prefix("remove-default-vpcs-job-")
                    .unwrap()
                    .parse()
                    .unwrap();
                assert!(EXECUTION_SUFFIX_RANGE.contains(&suffix));
                assert!(execution_arn.ends_with(":run"));
            }
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_resolves_organization_accounts() {
        let mut backend = MockTriggerBackend::new();
        backend
            .expect_list_active_account_ids()
            .times(1)
            .returning(|| Ok(vec![account("111111111111"), account("222222222222")]));
        backend.expect_list_regions().returning(|| Ok(regions()));

        let input = resolve_execution_input(&backend, &AccountSelector::All)
            .await
            .unwrap();

        assert_eq!(
            input.account_ids,
            [account("111111111111"), account("222222222222")]
        );
        assert_eq!(input.regions, regions());
    }

    #[tokio::test]
    async fn test_region_failure_yields_empty_list() {
        let mut backend = MockTriggerBackend::new();
        backend
            .expect_list_regions()
            .returning(|| Err(anyhow::anyhow!("UnauthorizedOperation")));
        backend
            .expect_start_execution()
            .withf(|_, input| input.regions.is_empty())
            .times(1)
            .returning(|_, _| Ok("arn".to_string()));

        let outcome = run_trigger(&backend, json!({"AccountId": "111122223333"}))
            .await
            .unwrap();
        assert!(matches!(outcome, TriggerOutcome::Started { .. }));
    }

    #[tokio::test]
    async fn test_notification_without_detail_starts_nothing() {
        let mut backend = MockTriggerBackend::new();
        backend.expect_list_regions().never();
        backend.expect_start_execution().never();

        let event = json!({
            "Records": [{"Sns": {"Message": "{\"source\": \"aws.organizations\"}"}}]
        });
        let outcome = run_trigger(&backend, event).await.unwrap();

        assert_eq!(outcome, TriggerOutcome::NoAccountDetails);
    }

    #[tokio::test]
    async fn test_notification_with_account_creation() {
        let message = json!({
            "detail": {
                "serviceEventDetails": {
                    "createAccountStatus": {"accountId": "444455556666"}
                }
            }
        })
        .to_string();

        let mut backend = MockTriggerBackend::new();
        backend.expect_list_regions().returning(|| Ok(regions()));
        backend
            .expect_start_execution()
            .withf(|_, input| input.account_ids == [AccountId::parse("444455556666").unwrap()])
            .times(1)
            .returning(|_, _| Ok("arn".to_string()));

        let event = json!({"Records": [{"Sns": {"Message": message}}]});
        run_trigger(&backend, event).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_event_is_an_error() {
        let mut backend = MockTriggerBackend::new();
        backend.expect_start_execution().never();

        let err = run_trigger(&backend, json!({"Unexpected": true}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Malformed trigger event"));
    }

    #[tokio::test]
    async fn test_start_failure_propagates() {
        let mut backend = MockTriggerBackend::new();
        backend.expect_list_regions().returning(|| Ok(regions()));
        backend
            .expect_start_execution()
            .with(always(), always())
            .returning(|_, _| Err(anyhow::anyhow!("ExecutionAlreadyExists")));

        let result = run_trigger(&backend, json!({"AccountId": "111122223333"})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_backend_without_state_machine_refuses_to_start() {
        let ctx = AwsContext::with_credentials(
            "us-east-1",
            aws_credential_types::Credentials::new("AKID", "secret", None, None, "test"),
        )
        .await;
        let backend = AwsTriggerBackend::from_context(&ctx);
        let input = ExecutionInput {
            account_ids: vec![account("111122223333")],
            regions: vec![],
        };

        let err = backend.start_execution("job", &input).await.unwrap_err();
        assert!(err.to_string().contains("No state machine ARN"));
    }
}
