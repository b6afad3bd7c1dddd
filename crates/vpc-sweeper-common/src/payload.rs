//! Workflow payloads exchanged with the Step Functions state machine
//!
//! Field names follow the state machine's PascalCase contract.

use crate::account::AccountId;
use serde::{Deserialize, Serialize};

/// Input of the teardown entry: one account, many regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownInput {
    #[serde(rename = "AccountId")]
    pub account_id: AccountId,
    #[serde(rename = "Regions", default)]
    pub regions: Vec<String>,
}

/// Input handed to the state machine when the trigger starts a workflow
///
/// The state machine fans `AccountIds` out into one teardown invocation per
/// account, each carrying the full `Regions` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInput {
    #[serde(rename = "AccountIds")]
    pub account_ids: Vec<AccountId>,
    #[serde(rename = "Regions")]
    pub regions: Vec<String>,
}

impl ExecutionInput {
    /// Serialize to the JSON string expected by `StartExecution`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_input_from_state_machine() {
        let input: TeardownInput = serde_json::from_str(
            r#"{"AccountId": "\"111122223333\"", "Regions": ["us-east-1", "eu-west-1"]}"#,
        )
        .unwrap();
        assert_eq!(input.account_id.as_str(), "111122223333");
        assert_eq!(input.regions, ["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn test_teardown_input_without_regions() {
        let input: TeardownInput =
            serde_json::from_str(r#"{"AccountId": "111122223333"}"#).unwrap();
        assert!(input.regions.is_empty());
    }

    #[test]
    fn test_execution_input_shape() {
        let input = ExecutionInput {
            account_ids: vec![
                AccountId::parse("111122223333").unwrap(),
                AccountId::parse("444455556666").unwrap(),
            ],
            regions: vec!["us-east-1".to_string()],
        };
        let value: serde_json::Value = serde_json::from_str(&input.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "AccountIds": ["111122223333", "444455556666"],
                "Regions": ["us-east-1"],
            })
        );
    }
}
