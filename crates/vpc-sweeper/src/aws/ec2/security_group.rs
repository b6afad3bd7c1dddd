//! Security group lookup and deletion

use super::types::SecurityGroupSummary;
use super::{Ec2Client, vpc_filter};
use crate::aws::error::AwsError;

impl Ec2Client {
    /// Security groups of the VPC, including the reserved "default" group
    pub async fn security_groups(
        &self,
        vpc_id: &str,
    ) -> Result<Vec<SecurityGroupSummary>, AwsError> {
        let response = self
            .client
            .describe_security_groups()
            .filters(vpc_filter(vpc_id))
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .security_groups()
            .iter()
            .filter_map(|sg| {
                let id = sg.group_id()?;
                Some(SecurityGroupSummary::new(id, sg.group_name().unwrap_or_default()))
            })
            .collect())
    }

    /// Delete a security group
    ///
    /// Fails with `DependencyViolation` while another group still references
    /// it; teardown logs that and moves on.
    pub async fn delete_security_group(&self, group_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }
}
