//! Account identifiers and account selection

use crate::defaults::ALL_ACCOUNTS;
use crate::error::EventError;
use serde::{Deserialize, Serialize};

const ACCOUNT_ID_LEN: usize = 12;

/// Strongly-typed AWS account ID (12 ASCII digits)
///
/// Orchestrators sometimes hand the id over JSON-encoded a second time
/// (`"\"111122223333\""`), so surrounding double quotes are stripped.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Deref,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parse an account id, stripping quotes and surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let id = raw.trim().trim_matches('"').trim();
        if id.is_empty() {
            return Err(EventError::EmptyAccountId);
        }
        if id.len() != ACCOUNT_ID_LEN || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EventError::InvalidAccountId(id.to_string()));
        }
        Ok(AccountId(id.to_string()))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountId::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// Which accounts an invocation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelector {
    /// Every active account in the organization
    All,
    /// One specific account
    Single(AccountId),
}

impl AccountSelector {
    /// Interpret the `AccountId` field of a direct invocation
    ///
    /// Only the bare literal `ALL` selects every account.
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        if raw == ALL_ACCOUNTS {
            Ok(AccountSelector::All)
        } else {
            AccountId::parse(raw).map(AccountSelector::Single)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_quotes() {
        let id = AccountId::parse("\"111122223333\"").unwrap();
        assert_eq!(id.as_str(), "111122223333");
        assert_eq!(id.to_string(), "111122223333");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            AccountId::parse("  \"\" "),
            Err(EventError::EmptyAccountId)
        ));
    }

    #[test]
    fn test_deserialize_quoted() {
        let id: AccountId = serde_json::from_str(r#""\"444455556666\"""#).unwrap();
        assert_eq!(*id, "444455556666");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids = vec![
            AccountId::parse("333333333333").unwrap(),
            AccountId::parse("111111111111").unwrap(),
            AccountId::parse("222222222222").unwrap(),
        ];
        ids.sort();
        let as_str: Vec<&str> = ids.iter().map(AccountId::as_str).collect();
        assert_eq!(as_str, ["111111111111", "222222222222", "333333333333"]);
    }

    #[test]
    fn test_selector() {
        assert_eq!(AccountSelector::parse("ALL").unwrap(), AccountSelector::All);
        assert_eq!(
            AccountSelector::parse("123456789012").unwrap(),
            AccountSelector::Single(AccountId::parse("123456789012").unwrap())
        );
        // Selection is case-sensitive, like the orchestrator contract
        assert!(matches!(
            AccountSelector::parse("all"),
            Err(EventError::InvalidAccountId(_))
        ));
    }

    #[test]
    fn test_selector_matches_bare_all_only() {
        assert!(matches!(
            AccountSelector::parse("\"ALL\""),
            Err(EventError::InvalidAccountId(id)) if id == "ALL"
        ));
        assert!(AccountSelector::parse(" ALL").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for raw in ["123", "1111222233334", "not-an-account/../x", "11112222333a"] {
            assert!(
                matches!(AccountId::parse(raw), Err(EventError::InvalidAccountId(_))),
                "{raw} should be rejected"
            );
        }
        assert!(serde_json::from_str::<AccountId>(r#""12345""#).is_err());
    }

    #[test]
    fn test_parse_accepts_quoted_valid_id() {
        let id = AccountId::parse(" \"012345678901\"\n").unwrap();
        assert_eq!(id.as_str(), "012345678901");
    }
}
