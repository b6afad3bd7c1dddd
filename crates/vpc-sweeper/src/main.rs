//! vpc-sweeper CLI - on-demand default VPC removal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use vpc_sweeper::aws::{
    AwsContext, Ec2Client, FromAwsContext, OrganizationsClient, classify_anyhow_error,
    get_current_account_id,
};
use vpc_sweeper::logging;
use vpc_sweeper::teardown::{self, TeardownOptions};
use vpc_sweeper::trigger::{self, AwsTriggerBackend};
use vpc_sweeper_common::defaults::DEFAULT_MANAGEMENT_REGION;
use vpc_sweeper_common::{AccountId, AccountSelector};

#[derive(Parser, Debug)]
#[command(name = "vpc-sweeper")]
#[command(about = "Remove default VPCs from the accounts of an AWS organization")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Region for management-account calls (STS, Organizations, Step Functions)
    #[arg(long, global = true, default_value = DEFAULT_MANAGEMENT_REGION)]
    region: String,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, global = true, env = "AWS_PROFILE")]
    aws_profile: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tear down the default VPCs of one member account
    Teardown {
        /// Target account ID
        #[arg(long)]
        account_id: String,

        /// Comma-separated regions (default: every region enabled for the caller)
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,

        /// Role assumed in the target account
        #[arg(long, env = "ROLE_TO_ASSUME")]
        role: String,

        /// Describe everything but delete nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Start the organization-wide teardown workflow
    Trigger {
        /// Target account ID, or ALL for every active account
        #[arg(long)]
        account_id: String,

        /// Step Functions state machine to start
        #[arg(long, env = "STATE_MACHINE_ARN")]
        state_machine_arn: Option<String>,

        /// Print the execution input instead of starting the workflow
        #[arg(long)]
        print_only: bool,
    },

    /// List the regions enabled for the caller
    Regions,

    /// List the active accounts of the organization
    Accounts,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    // Print main error message
    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    // Print error chain (causes)
    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init_cli();

    if let Some(profile) = &args.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }
    let aws = AwsContext::with_profile(&args.region, args.aws_profile.as_deref()).await;

    match args.command {
        Command::Teardown {
            account_id,
            regions,
            role,
            dry_run,
        } => handle_teardown(&aws, &account_id, regions, &role, dry_run).await,

        Command::Trigger {
            account_id,
            state_machine_arn,
            print_only,
        } => handle_trigger(&aws, &account_id, state_machine_arn, print_only).await,

        Command::Regions => {
            let regions = Ec2Client::from_context(&aws).list_regions().await?;
            for region in regions {
                println!("{region}");
            }
            Ok(())
        }

        Command::Accounts => {
            let caller = get_current_account_id(&aws).await?;
            info!(account_id = %caller, "Listing organization accounts");

            let accounts = OrganizationsClient::from_context(&aws)
                .list_active_account_ids()
                .await?;
            for account in accounts {
                println!("{account}");
            }
            Ok(())
        }
    }
}

/// Handle the teardown command
async fn handle_teardown(
    aws: &AwsContext,
    account_id: &str,
    regions: Vec<String>,
    role: &str,
    dry_run: bool,
) -> Result<()> {
    let account_id = AccountId::parse(account_id).context("Invalid --account-id")?;

    let regions = if regions.is_empty() {
        Ec2Client::from_context(aws)
            .list_regions()
            .await
            .context("Failed to list regions; pass --regions explicitly")?
    } else {
        regions
    };

    let results = teardown::teardown_account(
        aws,
        &account_id,
        &regions,
        role,
        TeardownOptions { dry_run },
    )
    .await?;

    println!("{:<16} RESULT", "REGION");
    println!("{}", "-".repeat(60));
    for result in &results {
        println!("{:<16} {}", result.region, result.outcome);
    }

    let torn_down = results.iter().filter(|r| r.outcome.is_torn_down()).count();
    println!("\n{account_id}: {torn_down} of {} regions torn down", results.len());

    Ok(())
}

/// Handle the trigger command
async fn handle_trigger(
    aws: &AwsContext,
    account_id: &str,
    state_machine_arn: Option<String>,
    print_only: bool,
) -> Result<()> {
    let selector = AccountSelector::parse(account_id).context("Invalid --account-id")?;

    let mut backend = AwsTriggerBackend::from_context(aws);
    if let Some(arn) = state_machine_arn {
        backend = backend.with_state_machine(arn);
    } else if !print_only {
        anyhow::bail!("--state-machine-arn (or STATE_MACHINE_ARN) is required to start a workflow");
    }

    let input = trigger::resolve_execution_input(&backend, &selector).await?;

    if print_only {
        println!("{}", serde_json::to_string_pretty(&input)?);
        return Ok(());
    }

    let (name, arn) = trigger::start_workflow(&backend, &input).await?;
    println!("Started {name}");
    println!("{arn}");

    Ok(())
}
