//! Teardown results and per-region outcomes

use std::fmt;
use vpc_sweeper_common::ResourceKind;

/// Result of a single teardown step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Resource was successfully deleted
    Deleted,
    /// Resource was already gone (not found)
    AlreadyDeleted,
    /// Describe or delete call failed; teardown continued
    Failed,
    /// Resource is owned by the VPC (main route table, default ACL/SG)
    Skipped,
    /// Dry run: the delete call was not made
    DryRun,
}

/// One entry of the teardown log, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: ResourceKind,
    /// `None` when the describe call for this kind failed
    pub resource_id: Option<String>,
    pub result: StepResult,
}

/// Ordered record of what a region teardown did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub steps: Vec<StepRecord>,
}

impl TeardownReport {
    pub(crate) fn record(&mut self, kind: ResourceKind, resource_id: &str, result: StepResult) {
        self.steps.push(StepRecord {
            kind,
            resource_id: Some(resource_id.to_string()),
            result,
        });
    }

    pub(crate) fn record_describe_failure(&mut self, kind: ResourceKind) {
        self.steps.push(StepRecord {
            kind,
            resource_id: None,
            result: StepResult::Failed,
        });
    }

    /// Number of steps of `kind` that ended with `result`
    pub fn count(&self, kind: ResourceKind, result: StepResult) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == kind && s.result == result)
            .count()
    }

    /// Resources deleted (or already gone) across all kinds
    pub fn deleted(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.result, StepResult::Deleted | StepResult::AlreadyDeleted))
            .count()
    }

    /// Failed describe/delete calls across all kinds
    pub fn failed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.result == StepResult::Failed)
            .count()
    }

    /// Whether the VPC itself is gone at the end of the run
    pub fn vpc_deleted(&self) -> bool {
        self.steps.iter().any(|s| {
            s.kind == ResourceKind::Vpc
                && matches!(s.result, StepResult::Deleted | StepResult::AlreadyDeleted)
        })
    }

    /// Number of steps that ended with `result`, across all kinds
    pub fn count_result(&self, result: StepResult) -> usize {
        self.steps.iter().filter(|s| s.result == result).count()
    }

    pub fn is_dry_run(&self) -> bool {
        self.count_result(StepResult::DryRun) > 0
    }

    /// IDs touched for `kind`, in order, whatever the result
    pub fn ids(&self, kind: ResourceKind) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.kind == kind)
            .filter_map(|s| s.resource_id.as_deref())
            .collect()
    }
}

/// What happened to one region of one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionOutcome {
    /// Region has no default VPC
    NoDefaultVpc,
    /// More than one VPC claims to be the default; left alone
    MultipleDefaultVpcs(Vec<String>),
    /// Region is not enabled for the account
    OptInRequired,
    /// Default VPC hosts instances and was kept
    HasInstances { vpc_id: String },
    /// Teardown ran (fully or partially, see the report)
    TornDown {
        vpc_id: String,
        report: TeardownReport,
    },
}

impl RegionOutcome {
    pub fn is_torn_down(&self) -> bool {
        matches!(self, RegionOutcome::TornDown { .. })
    }
}

impl fmt::Display for RegionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionOutcome::NoDefaultVpc => write!(f, "no default VPC"),
            RegionOutcome::MultipleDefaultVpcs(ids) => {
                write!(f, "skipped, multiple default VPCs ({})", ids.join(", "))
            }
            RegionOutcome::OptInRequired => write!(f, "skipped, opt-in required"),
            RegionOutcome::HasInstances { vpc_id } => write!(f, "kept {vpc_id}, has instances"),
            RegionOutcome::TornDown { vpc_id, report } if report.vpc_deleted() => {
                write!(f, "deleted {vpc_id} ({} resources)", report.deleted())
            }
            RegionOutcome::TornDown { vpc_id, report } if report.is_dry_run() => write!(
                f,
                "dry run for {vpc_id} ({} resources would be deleted)",
                report.count_result(StepResult::DryRun)
            ),
            RegionOutcome::TornDown { vpc_id, report } => write!(
                f,
                "partially removed {vpc_id} ({} deleted, {} failed)",
                report.deleted(),
                report.failed()
            ),
        }
    }
}

/// Outcome of one region, tagged with its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTeardown {
    pub region: String,
    pub outcome: RegionOutcome,
}
