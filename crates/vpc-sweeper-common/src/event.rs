//! Trigger invocation parsing
//!
//! The trigger is invoked in one of two shapes:
//!
//! - directly, `{"AccountId": "<id>" | "ALL"}`
//! - through SNS, carrying an Organizations `CreateAccountResult` event (or a
//!   bare account id) in `Records[0].Sns.Message`

use crate::account::{AccountId, AccountSelector};
use crate::error::EventError;
use serde::Deserialize;
use serde_json::Value;

/// Raw trigger payload as delivered by Lambda
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TriggerInput {
    /// On-demand invocation naming an account or `ALL`
    Direct {
        #[serde(rename = "AccountId")]
        account_id: String,
    },
    /// SNS notification envelope
    Notification(NotificationEnvelope),
}

/// SNS envelope (`Records[].Sns.Message`), reduced to the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: NotificationBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationBody {
    /// Usually a string; tolerated as an already-decoded object
    #[serde(rename = "Message")]
    pub message: Value,
}

/// What the trigger should do for an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerRequest {
    /// Start a workflow for the selected accounts
    Accounts(AccountSelector),
    /// The notification carried no account details; nothing to start
    NoAccountDetails,
}

impl TriggerInput {
    /// Parse a raw Lambda payload
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve the payload into a trigger request
    pub fn into_request(self) -> Result<TriggerRequest, EventError> {
        match self {
            TriggerInput::Direct { account_id } => {
                AccountSelector::parse(&account_id).map(TriggerRequest::Accounts)
            }
            TriggerInput::Notification(envelope) => {
                let record = envelope.records.into_iter().next().ok_or(EventError::NoRecords)?;
                match account_from_message(&record.sns.message)? {
                    Some(id) => Ok(TriggerRequest::Accounts(AccountSelector::Single(id))),
                    None => Ok(TriggerRequest::NoAccountDetails),
                }
            }
        }
    }
}

/// Parse a raw Lambda payload straight into a trigger request
pub fn parse_trigger_event(value: Value) -> Result<TriggerRequest, EventError> {
    TriggerInput::from_value(value)?.into_request()
}

/// Extract the account id from an SNS message body
///
/// A non-JSON string is the account id itself. A JSON document is an
/// EventBridge-style event whose `detail` holds the CreateAccount result;
/// a document whose `detail` is missing or blank yields `None`.
pub fn account_from_message(message: &Value) -> Result<Option<AccountId>, EventError> {
    let event = match message {
        Value::String(raw) if !raw.trim_start().starts_with('{') => {
            return AccountId::parse(raw).map(Some);
        }
        Value::String(raw) => serde_json::from_str::<Value>(raw)?,
        other => other.clone(),
    };

    let detail = match event.get("detail") {
        Some(detail) if !is_blank(detail) => detail,
        _ => return Ok(None),
    };

    let account_id = detail
        .get("serviceEventDetails")
        .ok_or(EventError::MissingField("detail.serviceEventDetails"))?
        .get("createAccountStatus")
        .ok_or(EventError::MissingField(
            "detail.serviceEventDetails.createAccountStatus",
        ))?
        .get("accountId")
        .and_then(Value::as_str)
        .ok_or(EventError::MissingField(
            "detail.serviceEventDetails.createAccountStatus.accountId",
        ))?;

    AccountId::parse(account_id).map(Some)
}

/// Null, false, zero, or an empty string/array/object
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sns(message: Value) -> Value {
        json!({ "Records": [{ "Sns": { "Message": message } }] })
    }

    fn single(id: &str) -> TriggerRequest {
        TriggerRequest::Accounts(AccountSelector::Single(AccountId::parse(id).unwrap()))
    }

    #[test]
    fn test_direct_single_account() {
        let request = parse_trigger_event(json!({ "AccountId": "111122223333" })).unwrap();
        assert_eq!(request, single("111122223333"));
    }

    #[test]
    fn test_direct_all_accounts() {
        let request = parse_trigger_event(json!({ "AccountId": "ALL" })).unwrap();
        assert_eq!(request, TriggerRequest::Accounts(AccountSelector::All));
    }

    #[test]
    fn test_sns_raw_account_id() {
        let request = parse_trigger_event(sns(json!("444455556666"))).unwrap();
        assert_eq!(request, single("444455556666"));
    }

    #[test]
    fn test_sns_create_account_event() {
        let message = json!({
            "source": "aws.organizations",
            "detail": {
                "eventName": "CreateAccountResult",
                "serviceEventDetails": {
                    "createAccountStatus": {
                        "accountId": "777788889999",
                        "state": "SUCCEEDED"
                    }
                }
            }
        });
        let request = parse_trigger_event(sns(json!(message.to_string()))).unwrap();
        assert_eq!(request, single("777788889999"));
    }

    #[test]
    fn test_sns_message_already_decoded() {
        let message = json!({
            "detail": {
                "serviceEventDetails": {
                    "createAccountStatus": { "accountId": "777788889999" }
                }
            }
        });
        let request = parse_trigger_event(sns(message)).unwrap();
        assert_eq!(request, single("777788889999"));
    }

    #[test]
    fn test_sns_without_detail() {
        let message = json!({ "source": "aws.organizations" }).to_string();
        let request = parse_trigger_event(sns(json!(message))).unwrap();
        assert_eq!(request, TriggerRequest::NoAccountDetails);
    }

    #[test]
    fn test_sns_blank_detail() {
        for detail in [json!(null), json!(""), json!([]), json!({}), json!(0), json!(false)] {
            let message = json!({ "detail": detail }).to_string();
            let request = parse_trigger_event(sns(json!(message))).unwrap();
            assert_eq!(request, TriggerRequest::NoAccountDetails, "detail = {detail}");
        }
    }

    #[test]
    fn test_sns_detail_missing_account_id() {
        let message = json!({ "detail": { "serviceEventDetails": {} } }).to_string();
        let err = parse_trigger_event(sns(json!(message))).unwrap_err();
        assert!(matches!(err, EventError::MissingField(_)));
    }

    #[test]
    fn test_sns_invalid_json_message() {
        let err = parse_trigger_event(sns(json!("{not json"))).unwrap_err();
        assert!(matches!(err, EventError::Parse(_)));
    }

    #[test]
    fn test_empty_envelope() {
        let err = parse_trigger_event(json!({ "Records": [] })).unwrap_err();
        assert!(matches!(err, EventError::NoRecords));
    }
}
