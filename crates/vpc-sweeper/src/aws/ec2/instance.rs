//! Workload detection: availability zones and instance placement

use super::{Ec2Client, vpc_filter};
use crate::aws::error::AwsError;
use aws_sdk_ec2::types::Filter;
use tracing::debug;

/// Instance states that still hold a network interface in the VPC
const LIVE_INSTANCE_STATES: &[&str] = &[
    "pending",
    "running",
    "shutting-down",
    "stopping",
    "stopped",
];

impl Ec2Client {
    /// Zone names of the availability zones whose region is `region`
    pub async fn region_availability_zones(&self, region: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_availability_zones()
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .availability_zones()
            .iter()
            .filter(|az| az.region_name() == Some(region))
            .filter_map(|az| az.zone_name())
            .map(str::to_string)
            .collect())
    }

    /// Placement zone of every non-terminated instance in the VPC, across all result pages
    pub async fn instance_zones(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let mut zones = Vec::new();
        let mut next_token: Option<String> = None;

        let state_filter = LIVE_INSTANCE_STATES
            .iter()
            .fold(Filter::builder().name("instance-state-name"), |b, s| b.values(*s))
            .build();

        loop {
            let response = self
                .client
                .describe_instances()
                .filters(vpc_filter(vpc_id))
                .filters(state_filter.clone())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| AwsError::from_sdk(&e))?;

            zones.extend(
                response
                    .reservations()
                    .iter()
                    .flat_map(|r| r.instances())
                    .filter_map(|i| i.placement().and_then(|p| p.availability_zone()))
                    .map(str::to_string),
            );

            // Handle pagination
            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(vpc_id = %vpc_id, instances = zones.len(), "Listed instance placements");
        Ok(zones)
    }
}
