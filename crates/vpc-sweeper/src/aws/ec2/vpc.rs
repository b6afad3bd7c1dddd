//! Default VPC lookup and network resource teardown calls

use super::types::{NetworkAclSummary, RouteTableSummary};
use super::{Ec2Client, vpc_filter};
use crate::aws::error::AwsError;
use aws_sdk_ec2::types::Filter;
use tracing::debug;

impl Ec2Client {
    /// IDs of every VPC flagged as the region's default
    pub async fn default_vpc_ids(&self) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_vpcs()
            .filters(Filter::builder().name("isDefault").values("true").build())
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        let ids: Vec<String> = response
            .vpcs()
            .iter()
            .filter_map(|v| v.vpc_id())
            .map(str::to_string)
            .collect();

        debug!(region = %self.region(), count = ids.len(), "Found default VPCs");
        Ok(ids)
    }

    /// Internet gateways attached to the VPC
    pub async fn internet_gateway_ids(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_internet_gateways()
            .filters(
                Filter::builder()
                    .name("attachment.vpc-id")
                    .values(vpc_id)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .internet_gateways()
            .iter()
            .filter_map(|igw| igw.internet_gateway_id())
            .map(str::to_string)
            .collect())
    }

    pub async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), AwsError> {
        self.client
            .detach_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }

    pub async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }

    pub async fn subnet_ids(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_subnets()
            .filters(vpc_filter(vpc_id))
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .subnets()
            .iter()
            .filter_map(|s| s.subnet_id())
            .map(str::to_string)
            .collect())
    }

    pub async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_subnet()
            .subnet_id(subnet_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }

    /// Route tables of the VPC, flagged main if any association is main
    pub async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTableSummary>, AwsError> {
        let response = self
            .client
            .describe_route_tables()
            .filters(vpc_filter(vpc_id))
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .route_tables()
            .iter()
            .filter_map(|rt| {
                let id = rt.route_table_id()?;
                let is_main = rt.associations().iter().any(|a| a.main().unwrap_or(false));
                Some(RouteTableSummary::new(id, is_main))
            })
            .collect())
    }

    pub async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }

    pub async fn network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAclSummary>, AwsError> {
        let response = self
            .client
            .describe_network_acls()
            .filters(vpc_filter(vpc_id))
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;

        Ok(response
            .network_acls()
            .iter()
            .filter_map(|acl| {
                let id = acl.network_acl_id()?;
                Some(NetworkAclSummary::new(id, acl.is_default().unwrap_or(false)))
            })
            .collect())
    }

    pub async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_network_acl()
            .network_acl_id(network_acl_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }

    pub async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_vpc()
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk(&e))?;
        Ok(())
    }
}
