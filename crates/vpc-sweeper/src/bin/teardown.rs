//! Lambda handler: tear down the default VPCs of one account
//!
//! Invoked by the state machine once per account with
//! `{"AccountId": "...", "Regions": [...]}`.

use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::info;
use vpc_sweeper::aws::AwsContext;
use vpc_sweeper::config::TeardownConfig;
use vpc_sweeper::logging;
use vpc_sweeper::teardown::{self, TeardownOptions};
use vpc_sweeper_common::TeardownInput;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_lambda();

    let config = TeardownConfig::from_env().context("Invalid teardown configuration")?;
    let aws = AwsContext::new(&config.region).await;
    info!(role = %config.role_to_assume, dry_run = config.dry_run, "Teardown handler ready");

    lambda_runtime::run(service_fn(move |event| {
        handle(aws.clone(), config.clone(), event)
    }))
    .await
}

async fn handle(
    aws: AwsContext,
    config: TeardownConfig,
    event: LambdaEvent<TeardownInput>,
) -> Result<bool, Error> {
    let input = event.payload;
    info!(
        request_id = %event.context.request_id,
        account_id = %input.account_id,
        regions = ?input.regions,
        "Received teardown request"
    );

    let results = teardown::teardown_account(
        &aws,
        &input.account_id,
        &input.regions,
        &config.role_to_assume,
        TeardownOptions {
            dry_run: config.dry_run,
        },
    )
    .await?;

    for result in &results {
        info!(
            account_id = %input.account_id,
            region = %result.region,
            outcome = %result.outcome,
            "Region done"
        );
    }

    Ok(true)
}
