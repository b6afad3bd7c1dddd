//! Step Functions workflow start

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::AwsError;
use anyhow::{Context, Result};
use aws_sdk_sfn::Client;
use tracing::info;

/// Step Functions client
pub struct SfnClient {
    client: Client,
}

impl FromAwsContext for SfnClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.sfn_client(),
        }
    }
}

impl SfnClient {
    /// Start an execution and return its ARN
    pub async fn start_execution(
        &self,
        state_machine_arn: &str,
        name: &str,
        input: &str,
    ) -> Result<String> {
        let response = self
            .client
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .name(name)
            .input(input)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))
            .with_context(|| format!("Failed to start execution {name}"))?;

        let execution_arn = response.execution_arn().to_string();
        info!(execution_arn = %execution_arn, "Started teardown workflow");
        Ok(execution_arn)
    }
}
