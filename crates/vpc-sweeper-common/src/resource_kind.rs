//! VPC resource types and teardown ordering
//!
//! Provides the teardown priority used by every teardown implementation.
//! Resources must be removed in dependency order or EC2 rejects the delete.

use std::fmt;

/// Types of VPC resources removed by vpc-sweeper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Internet gateway (must be detached before the VPC can go)
    InternetGateway,
    /// Subnet
    Subnet,
    /// Route table (main route table is left for the VPC delete)
    RouteTable,
    /// Network ACL (default ACL is left for the VPC delete)
    NetworkAcl,
    /// Security group ("default" group is left for the VPC delete)
    SecurityGroup,
    /// The VPC itself
    Vpc,
}

impl ResourceKind {
    /// Every kind, in teardown order
    pub const TEARDOWN_ORDER: [ResourceKind; 6] = [
        ResourceKind::InternetGateway,
        ResourceKind::Subnet,
        ResourceKind::RouteTable,
        ResourceKind::NetworkAcl,
        ResourceKind::SecurityGroup,
        ResourceKind::Vpc,
    ];

    /// Get teardown priority (lower number = removed first)
    ///
    /// - 0: Internet gateway (detach + delete)
    /// - 1: Subnets
    /// - 2: Route tables
    /// - 3: Network ACLs
    /// - 4: Security groups
    /// - 5: VPC
    pub fn teardown_priority(self) -> u8 {
        match self {
            ResourceKind::InternetGateway => 0,
            ResourceKind::Subnet => 1,
            ResourceKind::RouteTable => 2,
            ResourceKind::NetworkAcl => 3,
            ResourceKind::SecurityGroup => 4,
            ResourceKind::Vpc => 5,
        }
    }

    /// Stable name for logs and reports
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::InternetGateway => "internet-gateway",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route-table",
            ResourceKind::NetworkAcl => "network-acl",
            ResourceKind::SecurityGroup => "security-group",
            ResourceKind::Vpc => "vpc",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_first_vpc_last() {
        let first = ResourceKind::TEARDOWN_ORDER.first().copied();
        let last = ResourceKind::TEARDOWN_ORDER.last().copied();
        assert_eq!(first, Some(ResourceKind::InternetGateway));
        assert_eq!(last, Some(ResourceKind::Vpc));
    }

    #[test]
    fn test_order_matches_priority() {
        let mut sorted = ResourceKind::TEARDOWN_ORDER;
        sorted.sort_by_key(|k| k.teardown_priority());
        assert_eq!(sorted, ResourceKind::TEARDOWN_ORDER);

        for (i, kind) in ResourceKind::TEARDOWN_ORDER.iter().enumerate() {
            assert_eq!(kind.teardown_priority() as usize, i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceKind::NetworkAcl.to_string(), "network-acl");
        assert_eq!(ResourceKind::Vpc.to_string(), "vpc");
    }
}
