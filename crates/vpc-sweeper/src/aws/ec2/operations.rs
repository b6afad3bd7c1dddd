//! EC2 operations trait used by the teardown sequence

use super::Ec2Client;
use super::types::{NetworkAclSummary, RouteTableSummary, SecurityGroupSummary};
use crate::aws::error::AwsError;
use std::future::Future;

/// Trait for the EC2 calls a default-VPC teardown makes.
///
/// This trait abstracts the EC2 client so the teardown sequence can be
/// unit tested without hitting real AWS. Every call is a single API request
/// scoped to one region.
pub trait VpcOperations: Send + Sync {
    /// IDs of VPCs with `isDefault = true`
    fn default_vpc_ids(&self) -> impl Future<Output = Result<Vec<String>, AwsError>> + Send;

    /// Zone names of the availability zones that belong to `region`
    fn region_availability_zones(
        &self,
        region: &str,
    ) -> impl Future<Output = Result<Vec<String>, AwsError>> + Send;

    /// Placement zone of every instance in the VPC
    fn instance_zones(
        &self,
        vpc_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, AwsError>> + Send;

    /// Internet gateways attached to the VPC
    fn internet_gateway_ids(
        &self,
        vpc_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, AwsError>> + Send;

    /// Detach an internet gateway from the VPC
    fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Delete a detached internet gateway
    fn delete_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Subnets of the VPC
    fn subnet_ids(&self, vpc_id: &str)
    -> impl Future<Output = Result<Vec<String>, AwsError>> + Send;

    /// Delete a subnet
    fn delete_subnet(&self, subnet_id: &str) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Route tables of the VPC
    fn route_tables(
        &self,
        vpc_id: &str,
    ) -> impl Future<Output = Result<Vec<RouteTableSummary>, AwsError>> + Send;

    /// Delete a route table
    fn delete_route_table(
        &self,
        route_table_id: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Network ACLs of the VPC
    fn network_acls(
        &self,
        vpc_id: &str,
    ) -> impl Future<Output = Result<Vec<NetworkAclSummary>, AwsError>> + Send;

    /// Delete a network ACL
    fn delete_network_acl(
        &self,
        network_acl_id: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Security groups of the VPC
    fn security_groups(
        &self,
        vpc_id: &str,
    ) -> impl Future<Output = Result<Vec<SecurityGroupSummary>, AwsError>> + Send;

    /// Delete a security group
    fn delete_security_group(
        &self,
        group_id: &str,
    ) -> impl Future<Output = Result<(), AwsError>> + Send;

    /// Delete the VPC itself
    fn delete_vpc(&self, vpc_id: &str) -> impl Future<Output = Result<(), AwsError>> + Send;
}

impl VpcOperations for Ec2Client {
    async fn default_vpc_ids(&self) -> Result<Vec<String>, AwsError> {
        Ec2Client::default_vpc_ids(self).await
    }

    async fn region_availability_zones(&self, region: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::region_availability_zones(self, region).await
    }

    async fn instance_zones(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::instance_zones(self, vpc_id).await
    }

    async fn internet_gateway_ids(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::internet_gateway_ids(self, vpc_id).await
    }

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), AwsError> {
        Ec2Client::detach_internet_gateway(self, internet_gateway_id, vpc_id).await
    }

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_internet_gateway(self, internet_gateway_id).await
    }

    async fn subnet_ids(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::subnet_ids(self, vpc_id).await
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_subnet(self, subnet_id).await
    }

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTableSummary>, AwsError> {
        Ec2Client::route_tables(self, vpc_id).await
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_route_table(self, route_table_id).await
    }

    async fn network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAclSummary>, AwsError> {
        Ec2Client::network_acls(self, vpc_id).await
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_network_acl(self, network_acl_id).await
    }

    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroupSummary>, AwsError> {
        Ec2Client::security_groups(self, vpc_id).await
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_security_group(self, group_id).await
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_vpc(self, vpc_id).await
    }
}
