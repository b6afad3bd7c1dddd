//! Default VPC teardown
//!
//! For one account/region pair: find the default VPC, make sure no instance
//! lives in it, then delete its dependents in the order EC2 requires:
//!
//! 1. internet gateway (detach, then delete)
//! 2. subnets
//! 3. route tables (main table left for the VPC delete)
//! 4. network ACLs (default ACL left for the VPC delete)
//! 5. security groups ("default" group left for the VPC delete)
//! 6. the VPC
//!
//! Each describe/delete step that fails is logged and the sequence moves on.
//! Only the default-VPC lookup and the instance check can abort a region.

mod report;

pub use report::{RegionOutcome, RegionTeardown, StepRecord, StepResult, TeardownReport};

use crate::aws::account::assume_role;
use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::ec2::{Ec2Client, VpcOperations};
use crate::aws::error::{AwsError, ignore_not_found};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, info, warn};
use vpc_sweeper_common::{AccountId, ResourceKind};

/// Knobs for a teardown run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownOptions {
    /// Describe everything but make no detach/delete call
    pub dry_run: bool,
}

/// Tear down the default VPC of every region in `regions` for one account.
///
/// The cross-account role is assumed once; each region then gets its own
/// EC2 client signed with the assumed credentials. Regions run one after
/// another.
pub async fn teardown_account(
    ctx: &AwsContext,
    account_id: &AccountId,
    regions: &[String],
    role_name: &str,
    options: TeardownOptions,
) -> Result<Vec<RegionTeardown>> {
    info!(
        account_id = %account_id,
        regions = regions.len(),
        dry_run = options.dry_run,
        "Processing account"
    );

    let credentials = assume_role(ctx, account_id, role_name).await?;

    let mut outcomes = Vec::with_capacity(regions.len());
    for region in regions {
        let regional = AwsContext::with_credentials(region, credentials.clone()).await;
        let ec2 = Ec2Client::from_context(&regional);

        let outcome = teardown_region(&ec2, region, options)
            .await
            .with_context(|| format!("Teardown failed for account {account_id} in {region}"))?;

        outcomes.push(RegionTeardown {
            region: region.clone(),
            outcome,
        });
    }

    Ok(outcomes)
}

/// Tear down the default VPC of one region.
///
/// Returns an error only when the default-VPC lookup or the instance check
/// fails for a reason other than the region requiring opt-in.
pub async fn teardown_region<O: VpcOperations>(
    ops: &O,
    region: &str,
    options: TeardownOptions,
) -> Result<RegionOutcome> {
    let vpc_ids = match ops.default_vpc_ids().await {
        Ok(ids) => ids,
        Err(e) if e.is_opt_in_required() => {
            info!(region = %region, "Opt-in required, skipping");
            return Ok(RegionOutcome::OptInRequired);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to describe default VPCs in {region}"));
        }
    };

    let vpc_id = match vpc_ids.as_slice() {
        [] => {
            info!(region = %region, "No default VPC");
            return Ok(RegionOutcome::NoDefaultVpc);
        }
        [vpc_id] => vpc_id.clone(),
        _ => {
            warn!(region = %region, vpc_ids = ?vpc_ids, "Too many default VPCs, skipping");
            return Ok(RegionOutcome::MultipleDefaultVpcs(vpc_ids));
        }
    };

    match vpc_has_instances(ops, region, &vpc_id).await {
        Ok(false) => {}
        Ok(true) => {
            info!(vpc_id = %vpc_id, region = %region, "VPC has existing instances, keeping");
            return Ok(RegionOutcome::HasInstances { vpc_id });
        }
        Err(e) if e.is_opt_in_required() => {
            info!(region = %region, "Opt-in required, skipping");
            return Ok(RegionOutcome::OptInRequired);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to check instances in {vpc_id} ({region})"));
        }
    }

    info!(vpc_id = %vpc_id, region = %region, dry_run = options.dry_run, "Removing default VPC");

    let mut step = Steps {
        report: TeardownReport::default(),
        dry_run: options.dry_run,
    };

    delete_internet_gateways(ops, &vpc_id, &mut step).await;
    delete_subnets(ops, &vpc_id, &mut step).await;
    delete_route_tables(ops, &vpc_id, &mut step).await;
    delete_network_acls(ops, &vpc_id, &mut step).await;
    delete_security_groups(ops, &vpc_id, &mut step).await;

    let result = step
        .delete(ResourceKind::Vpc, &vpc_id, || ops.delete_vpc(&vpc_id))
        .await;
    if result == StepResult::Deleted {
        info!(
            vpc_id = %vpc_id,
            region = %region,
            "VPC {vpc_id} has been deleted from the {region} region."
        );
    }

    Ok(RegionOutcome::TornDown {
        vpc_id,
        report: step.report,
    })
}

/// True if an instance of the VPC sits in one of the region's zones
async fn vpc_has_instances<O: VpcOperations>(
    ops: &O,
    region: &str,
    vpc_id: &str,
) -> Result<bool, AwsError> {
    let zones: HashSet<String> = ops
        .region_availability_zones(region)
        .await?
        .into_iter()
        .collect();
    let instance_zones = ops.instance_zones(vpc_id).await?;

    Ok(instance_zones.iter().any(|z| zones.contains(z)))
}

/// Report builder that applies the dry-run and error-tolerance rules
struct Steps {
    report: TeardownReport,
    dry_run: bool,
}

impl Steps {
    /// Run a describe call; a failure is logged and yields an empty list
    fn listed<T>(
        &mut self,
        kind: ResourceKind,
        vpc_id: &str,
        result: Result<Vec<T>, AwsError>,
    ) -> Vec<T> {
        match result {
            Ok(items) => {
                debug!(vpc_id = %vpc_id, resource_type = %kind, count = items.len(), "Described");
                items
            }
            Err(e) => {
                warn!(vpc_id = %vpc_id, resource_type = %kind, error = %e, "Describe failed");
                self.report.record_describe_failure(kind);
                Vec::new()
            }
        }
    }

    /// Leave a VPC-owned resource in place
    fn skip(&mut self, kind: ResourceKind, id: &str) {
        debug!(resource_type = %kind, resource_id = %id, "Owned by the VPC, skipping");
        self.report.record(kind, id, StepResult::Skipped);
    }

    /// Run one delete call unless this is a dry run, and record the result
    async fn delete<F, Fut>(&mut self, kind: ResourceKind, id: &str, call: F) -> StepResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), AwsError>>,
    {
        let result = if self.dry_run {
            info!(resource_type = %kind, resource_id = %id, "[DRY RUN] Would delete");
            StepResult::DryRun
        } else {
            info!(resource_type = %kind, resource_id = %id, "Deleting");
            outcome(kind, id, call().await)
        };
        self.report.record(kind, id, result);
        result
    }
}

/// Map a delete call result to a step result, logging failures
fn outcome(kind: ResourceKind, id: &str, result: Result<(), AwsError>) -> StepResult {
    match result {
        Ok(()) => StepResult::Deleted,
        Err(e) if e.is_not_found() => {
            debug!(resource_type = %kind, resource_id = %id, "Already deleted");
            StepResult::AlreadyDeleted
        }
        Err(e) => {
            let suggestion = e.suggestion().unwrap_or_default();
            warn!(
                resource_type = %kind,
                resource_id = %id,
                error = %e,
                suggestion = %suggestion,
                "Delete failed, continuing"
            );
            StepResult::Failed
        }
    }
}

async fn delete_internet_gateways<O: VpcOperations>(ops: &O, vpc_id: &str, step: &mut Steps) {
    let kind = ResourceKind::InternetGateway;
    let igws = step.listed(kind, vpc_id, ops.internet_gateway_ids(vpc_id).await);

    for igw_id in &igws {
        if !step.dry_run {
            // A failed detach still lets the delete report the real problem
            match ignore_not_found(ops.detach_internet_gateway(igw_id, vpc_id).await) {
                Ok(Some(())) => debug!(igw_id = %igw_id, vpc_id = %vpc_id, "Detached"),
                Ok(None) => debug!(igw_id = %igw_id, vpc_id = %vpc_id, "Already detached"),
                Err(e) => warn!(igw_id = %igw_id, vpc_id = %vpc_id, error = %e, "Detach failed"),
            }
        }
        step.delete(kind, igw_id, || ops.delete_internet_gateway(igw_id)).await;
    }
}

async fn delete_subnets<O: VpcOperations>(ops: &O, vpc_id: &str, step: &mut Steps) {
    let kind = ResourceKind::Subnet;
    let subnets = step.listed(kind, vpc_id, ops.subnet_ids(vpc_id).await);

    for subnet_id in &subnets {
        step.delete(kind, subnet_id, || ops.delete_subnet(subnet_id)).await;
    }
}

async fn delete_route_tables<O: VpcOperations>(ops: &O, vpc_id: &str, step: &mut Steps) {
    let kind = ResourceKind::RouteTable;
    let tables = step.listed(kind, vpc_id, ops.route_tables(vpc_id).await);

    for table in &tables {
        let id = &table.route_table_id;
        if table.is_deletable() {
            step.delete(kind, id, || ops.delete_route_table(id)).await;
        } else {
            step.skip(kind, id);
        }
    }
}

async fn delete_network_acls<O: VpcOperations>(ops: &O, vpc_id: &str, step: &mut Steps) {
    let kind = ResourceKind::NetworkAcl;
    let acls = step.listed(kind, vpc_id, ops.network_acls(vpc_id).await);

    for acl in &acls {
        let id = &acl.network_acl_id;
        if acl.is_deletable() {
            step.delete(kind, id, || ops.delete_network_acl(id)).await;
        } else {
            step.skip(kind, id);
        }
    }
}

async fn delete_security_groups<O: VpcOperations>(ops: &O, vpc_id: &str, step: &mut Steps) {
    let kind = ResourceKind::SecurityGroup;
    let groups = step.listed(kind, vpc_id, ops.security_groups(vpc_id).await);

    for group in &groups {
        let id = &group.group_id;
        if group.is_deletable() {
            step.delete(kind, id, || ops.delete_security_group(id)).await;
        } else {
            step.skip(kind, id);
        }
    }
}
