//! AWS error classification and handling
//!
//! Provides typed errors for AWS SDK operations using the `.code()` method
//! instead of string matching on Debug format.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories for teardown and trigger logic
#[derive(Debug, Clone, Error)]
pub enum AwsError {
    /// Region is not enabled for the account (benign skip)
    #[error("Region requires opt-in: {message}")]
    OptInRequired { message: String },

    /// Resource was not found (already deleted)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Resource has dependent objects (e.g. ENI still attached to a subnet)
    #[error("Resource has dependent objects: {message}")]
    DependencyViolation { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Caller is not allowed to perform the operation
    #[error("Access denied: {message}")]
    AccessDenied { code: String, message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Classify any SDK error that carries error metadata.
    ///
    /// Errors without a service message (timeouts, dispatch failures) keep
    /// their full display chain as the message.
    pub fn from_sdk<E>(err: &E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        let message = match err.message() {
            Some(m) => m.to_string(),
            None => DisplayErrorContext(err).to_string(),
        };
        classify_aws_error(err.code(), Some(&message))
    }

    /// Check if this is an "opt-in required" error
    pub fn is_opt_in_required(&self) -> bool {
        matches!(self, AwsError::OptInRequired { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// The AWS error code, when one was returned
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::OptInRequired { .. } => Some("OptInRequired"),
            AwsError::DependencyViolation { .. } => Some("DependencyViolation"),
            AwsError::Throttled => None,
            AwsError::NotFound { code, .. } | AwsError::AccessDenied { code, .. } => {
                Some(code.as_str())
            }
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            AwsError::OptInRequired { .. } => suggestion_for_code("OptInRequired"),
            AwsError::Throttled => suggestion_for_code("Throttling"),
            AwsError::DependencyViolation { .. } => suggestion_for_code("DependencyViolation"),
            AwsError::AccessDenied { code, .. } => suggestion_for_code(code),
            AwsError::Sdk { code: Some(c), .. } => suggestion_for_code(c),
            _ => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidNetworkAclID.NotFound",
    "InvalidGroup.NotFound",
    "InvalidGroupId.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "Gateway.NotAttached",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "AuthFailure",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some("OptInRequired") => AwsError::OptInRequired { message },
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some("DependencyViolation") => AwsError::DependencyViolation { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied {
            code: c.to_string(),
            message,
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an error from an anyhow::Error.
///
/// Walks the error chain looking for an [`AwsError`]; anything else becomes
/// a generic `Sdk` error carrying the top-level message.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<AwsError>() {
            return e.clone();
        }
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Map a "not found" error to `Ok(None)`, pass everything else through.
///
/// Makes delete calls idempotent when a teardown is re-run.
pub fn ignore_not_found<T>(result: Result<T, AwsError>) -> Result<Option<T>, AwsError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "OptInRequired",
        "The region is disabled for this account; enable it in account settings to include it.",
    ),
    (
        "DependencyViolation",
        "Another resource still uses this one (often an ENI); remove it and re-run.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Re-run the teardown for the affected account.",
    ),
    (
        "AccessDenied",
        "Check that the cross-account role trusts the caller and allows EC2 actions.",
    ),
    (
        "AccessDeniedException",
        "Check that the caller may list organization accounts and start executions.",
    ),
    (
        "UnauthorizedOperation",
        "The assumed role lacks an EC2 permission needed for teardown.",
    ),
    (
        "AuthFailure",
        "Credentials were rejected; check the assumed role session.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_in_required() {
        let err = classify_aws_error(Some("OptInRequired"), Some("You are not subscribed"));
        assert!(err.is_opt_in_required());
        assert!(!err.is_not_found());
        assert_eq!(err.code(), Some("OptInRequired"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            let err = classify_aws_error(Some(code), Some("some message"));
            assert!(err.is_not_found(), "Expected NotFound for code: {code}");
            assert_eq!(err.code(), Some(*code));
        }
    }

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::Throttled));
        }
    }

    #[test]
    fn access_denied_codes() {
        for code in ACCESS_DENIED_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::AccessDenied { .. }));
            assert!(err.suggestion().is_some(), "No suggestion for code: {code}");
        }
    }

    #[test]
    fn dependency_violation() {
        let err = classify_aws_error(Some("DependencyViolation"), Some("ENI attached"));
        assert!(matches!(err, AwsError::DependencyViolation { .. }));
        assert!(err.to_string().contains("ENI attached"));
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_aws_error(Some("SomeNewError"), Some("details"));
        assert!(matches!(err, AwsError::Sdk { .. }));
        assert_eq!(err.code(), Some("SomeNewError"));

        let err2 = classify_aws_error(None, None);
        assert!(matches!(err2, AwsError::Sdk { code: None, .. }));
        assert_eq!(err2.to_string(), "AWS error: Unknown error");
    }

    #[test]
    fn anyhow_chain_keeps_classification() {
        let inner = classify_aws_error(Some("OptInRequired"), Some("not subscribed"));
        let wrapped = anyhow::Error::new(inner).context("Failed to describe VPCs");
        assert!(classify_anyhow_error(&wrapped).is_opt_in_required());

        let plain = anyhow::anyhow!("connection refused");
        assert!(matches!(
            classify_anyhow_error(&plain),
            AwsError::Sdk { code: None, .. }
        ));
    }

    #[test]
    fn ignore_not_found_behaviour() {
        let gone: Result<(), AwsError> =
            Err(classify_aws_error(Some("InvalidSubnetID.NotFound"), None));
        assert!(matches!(ignore_not_found(gone), Ok(None)));

        let ok: Result<u8, AwsError> = Ok(7);
        assert!(matches!(ignore_not_found(ok), Ok(Some(7))));

        let other: Result<(), AwsError> = Err(AwsError::Throttled);
        assert!(ignore_not_found(other).is_err());
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            assert!(
                suggestion_for_code(code).is_some(),
                "No suggestion for code: {code}"
            );
        }
        assert!(suggestion_for_code("SomeUnknownCode").is_none());
    }
}
