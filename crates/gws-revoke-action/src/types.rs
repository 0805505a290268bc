use gws_auth::AuthError;
use gws_core::current_iso8601_timestamp;
use gws_directory::DirectoryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const UNKNOWN_USER_KEY: &str = "unknown";

const INVALID_USER_KEY_MESSAGE: &str = "Invalid or missing userKey parameter";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated job parameters for one revocation.
pub struct RevokeSessionParams {
    /// Primary email, alias or directory ID of the target user.
    pub user_key: String,
    /// Explicit API base URL; wins over the `ADDRESS` environment value.
    pub address: Option<String>,
    /// Legacy parameter, echoed into the result when supplied.
    pub google_domain: Option<String>,
}

impl RevokeSessionParams {
    /// Validates raw job parameters. `userKey` must be a non-empty string.
    pub fn from_value(params: &Value) -> Result<Self, ActionError> {
        let user_key = params
            .get("userKey")
            .and_then(Value::as_str)
            .filter(|user_key| !user_key.is_empty())
            .ok_or_else(|| ActionError::Validation(INVALID_USER_KEY_MESSAGE.to_string()))?;

        Ok(Self {
            user_key: user_key.to_string(),
            address: optional_string(params, "address"),
            google_domain: optional_string(params, "googleDomain"),
        })
    }
}

fn optional_string(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(ToString::to_string)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Job output after the Directory API accepted the sign-out.
pub struct RevocationResult {
    pub user_key: String,
    pub session_revoked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_domain: Option<String>,
    pub revoked_at: String,
}

impl RevocationResult {
    pub fn revoked(user_key: String, google_domain: Option<String>) -> Self {
        Self {
            user_key,
            session_revoked: true,
            google_domain,
            revoked_at: current_iso8601_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Shutdown report returned when the framework halts the job.
pub struct HaltResult {
    pub user_key: String,
    pub reason: Option<String>,
    pub halted_at: String,
    pub cleanup_completed: bool,
}

impl HaltResult {
    /// Reads `userKey` and `reason` from any parameter shape; never fails.
    pub fn from_params(params: &Value) -> Self {
        let user_key = params
            .get("userKey")
            .and_then(Value::as_str)
            .filter(|user_key| !user_key.is_empty())
            .unwrap_or(UNKNOWN_USER_KEY)
            .to_string();
        let reason = match params.get("reason") {
            None | Some(Value::Null) => None,
            Some(Value::String(reason)) => Some(reason.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            user_key,
            reason,
            halted_at: current_iso8601_timestamp(),
            cleanup_completed: true,
        }
    }
}

#[derive(Debug, Error)]
/// Enumerates supported `ActionError` values.
pub enum ActionError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Credentials(#[from] AuthError),
    #[error(transparent)]
    Revocation(#[from] DirectoryError),
    #[error("failed to create http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ActionError {
    /// Upstream HTTP status, for the framework's retry policy.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ActionError::Credentials(error) => error.status_code(),
            ActionError::Revocation(error) => error.status_code(),
            ActionError::Validation(_) | ActionError::HttpClient(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.status_code(), Some(429 | 502 | 503 | 504))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ActionError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unit_params_require_non_empty_string_user_key() {
        for params in [
            json!({}),
            json!({ "userKey": "" }),
            json!({ "userKey": null }),
            json!({ "userKey": 42 }),
            json!({ "userKey": ["user@example.com"] }),
            json!("user@example.com"),
        ] {
            let error = RevokeSessionParams::from_value(&params).expect_err("invalid userKey");
            assert!(error.is_validation());
            assert_eq!(error.to_string(), "Invalid or missing userKey parameter");
        }
    }

    #[test]
    fn unit_params_read_optional_address_and_domain() {
        let params = RevokeSessionParams::from_value(&json!({
            "userKey": "user@example.com",
            "address": "https://admin.example.test",
            "googleDomain": "example.com"
        }))
        .expect("valid params");

        assert_eq!(params.user_key, "user@example.com");
        assert_eq!(params.address.as_deref(), Some("https://admin.example.test"));
        assert_eq!(params.google_domain.as_deref(), Some("example.com"));

        let params = RevokeSessionParams::from_value(&json!({
            "userKey": "user@example.com",
            "address": ""
        }))
        .expect("valid params");
        assert_eq!(params.address, None);
        assert_eq!(params.google_domain, None);
    }

    #[test]
    fn functional_revocation_result_serializes_camel_case() {
        let result = RevocationResult::revoked("user@example.com".to_string(), None);
        let value = serde_json::to_value(&result).expect("serialize");

        assert_eq!(value["userKey"], "user@example.com");
        assert_eq!(value["sessionRevoked"], true);
        assert!(value["revokedAt"].as_str().is_some());
        assert!(value.get("googleDomain").is_none());
    }

    #[test]
    fn functional_halt_result_tolerates_any_params() {
        let result = HaltResult::from_params(&json!({}));
        assert_eq!(result.user_key, UNKNOWN_USER_KEY);
        assert_eq!(result.reason, None);
        assert!(result.cleanup_completed);

        let result = HaltResult::from_params(&json!({
            "userKey": "user@example.com",
            "reason": "timeout"
        }));
        assert_eq!(result.user_key, "user@example.com");
        assert_eq!(result.reason.as_deref(), Some("timeout"));

        let result = HaltResult::from_params(&json!({ "userKey": 7, "reason": { "code": 1 } }));
        assert_eq!(result.user_key, UNKNOWN_USER_KEY);
        assert_eq!(result.reason.as_deref(), Some("{\"code\":1}"));

        let value = serde_json::to_value(HaltResult::from_params(&Value::Null)).expect("serialize");
        assert_eq!(value["userKey"], "unknown");
        assert_eq!(value["cleanupCompleted"], true);
        assert!(value["reason"].is_null());
        assert!(value["haltedAt"].as_str().is_some());
    }

    #[test]
    fn unit_status_code_surfaces_upstream_failures() {
        let revocation = ActionError::from(DirectoryError::Api {
            status: 503,
            message: "Failed to revoke sessions: HTTP 503".to_string(),
        });
        assert_eq!(revocation.status_code(), Some(503));
        assert!(revocation.is_retryable());
        assert_eq!(revocation.to_string(), "Failed to revoke sessions: HTTP 503");

        let credentials = ActionError::from(AuthError::TokenEndpointStatus {
            status: 400,
            status_text: "Bad Request".to_string(),
            body: "{}".to_string(),
        });
        assert_eq!(credentials.status_code(), Some(400));
        assert!(!credentials.is_retryable());

        let validation = ActionError::Validation("bad".to_string());
        assert_eq!(validation.status_code(), None);
        assert!(!validation.is_retryable());
    }
}
