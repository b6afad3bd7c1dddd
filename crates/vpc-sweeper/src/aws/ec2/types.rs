//! EC2 resource summaries returned by describe calls
//!
//! Only the identifiers and the flags teardown decides on are kept.

use vpc_sweeper_common::defaults::DEFAULT_SECURITY_GROUP_NAME;

/// Route table with its main-association flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTableSummary {
    pub route_table_id: String,
    /// True if any association of the table is the VPC's main association
    pub is_main: bool,
}

impl RouteTableSummary {
    pub fn new(route_table_id: impl Into<String>, is_main: bool) -> Self {
        Self {
            route_table_id: route_table_id.into(),
            is_main,
        }
    }

    /// The main route table goes away with the VPC and cannot be deleted directly
    pub fn is_deletable(&self) -> bool {
        !self.is_main
    }
}

/// Network ACL with its default flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAclSummary {
    pub network_acl_id: String,
    pub is_default: bool,
}

impl NetworkAclSummary {
    pub fn new(network_acl_id: impl Into<String>, is_default: bool) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            is_default,
        }
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_default
    }
}

/// Security group id and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupSummary {
    pub group_id: String,
    pub group_name: String,
}

impl SecurityGroupSummary {
    pub fn new(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
        }
    }

    /// The group named "default" is owned by the VPC
    pub fn is_default(&self) -> bool {
        self.group_name == DEFAULT_SECURITY_GROUP_NAME
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_route_table_not_deletable() {
        assert!(!RouteTableSummary::new("rtb-main", true).is_deletable());
        assert!(RouteTableSummary::new("rtb-custom", false).is_deletable());
    }

    #[test]
    fn test_default_acl_not_deletable() {
        assert!(!NetworkAclSummary::new("acl-default", true).is_deletable());
        assert!(NetworkAclSummary::new("acl-custom", false).is_deletable());
    }

    #[test]
    fn test_default_security_group_not_deletable() {
        assert!(!SecurityGroupSummary::new("sg-1", "default").is_deletable());
        assert!(SecurityGroupSummary::new("sg-2", "web").is_deletable());
        // Only the exact name is reserved
        assert!(SecurityGroupSummary::new("sg-3", "Default").is_deletable());
    }
}
