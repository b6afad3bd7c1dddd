//! Lambda handler: start the default VPC teardown workflow
//!
//! Accepts `{"AccountId": "<id>" | "ALL"}` or an SNS envelope carrying an
//! Organizations account-creation event.

use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use vpc_sweeper::aws::{AwsContext, FromAwsContext};
use vpc_sweeper::config::TriggerConfig;
use vpc_sweeper::logging;
use vpc_sweeper::trigger::{self, AwsTriggerBackend, TriggerOutcome};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_lambda();

    let config = TriggerConfig::from_env().context("Invalid trigger configuration")?;
    let aws = AwsContext::new(&config.region).await;
    let backend = Arc::new(
        AwsTriggerBackend::from_context(&aws).with_state_machine(config.state_machine_arn),
    );

    lambda_runtime::run(service_fn(move |event| handle(backend.clone(), event))).await
}

async fn handle(backend: Arc<AwsTriggerBackend>, event: LambdaEvent<Value>) -> Result<bool, Error> {
    info!(request_id = %event.context.request_id, "Received trigger event");

    match trigger::run_trigger(backend.as_ref(), event.payload).await? {
        TriggerOutcome::Started {
            execution_name,
            execution_arn,
            input,
        } => {
            info!(
                execution_name = %execution_name,
                execution_arn = %execution_arn,
                accounts = input.account_ids.len(),
                regions = input.regions.len(),
                "Workflow started"
            );
        }
        TriggerOutcome::NoAccountDetails => {}
    }

    Ok(true)
}
