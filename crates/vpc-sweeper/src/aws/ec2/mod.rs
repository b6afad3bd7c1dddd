//! EC2 client for default VPC discovery and teardown

mod instance;
mod operations;
mod security_group;
mod types;
mod vpc;

pub use operations::VpcOperations;
pub use types::{NetworkAclSummary, RouteTableSummary, SecurityGroupSummary};

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::AwsError;
use aws_sdk_ec2::{Client, types::Filter};
use tracing::debug;

/// EC2 client scoped to one account and region
pub struct Ec2Client {
    pub(crate) client: Client,
    region: String,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
            region: ctx.region().to_string(),
        }
    }
}

impl Ec2Client {
    /// Create a new EC2 client (loads AWS config from environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }

    /// Region this client talks to
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Names of the regions enabled for the calling account
    pub async fn list_regions(&self) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_regions()
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        let regions: Vec<String> = response
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(str::to_string)
            .collect();

        debug!(count = regions.len(), "Listed regions");
        Ok(regions)
    }
}

/// Filter on the `vpc-id` attribute, shared by most describe calls
pub(crate) fn vpc_filter(vpc_id: &str) -> Filter {
    Filter::builder().name("vpc-id").values(vpc_id).build()
}
