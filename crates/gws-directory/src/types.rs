use async_trait::async_trait;
use gws_auth::AuthorizationHeader;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates supported `DirectoryError` values.
pub enum DirectoryError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid authorization header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl DirectoryError {
    /// HTTP status returned by the Directory API; `None` when no response arrived.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DirectoryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for statuses the job framework treats as transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status_code(), Some(429 | 502 | 503 | 504))
    }
}

/// Builds the failure message for a non-success sign-out response.
///
/// Uses `error.message` from a Google JSON error body when present and falls
/// back to the bare status otherwise.
pub fn revocation_failure_message(status: u16, body: &str) -> String {
    let api_message = match serde_json::from_str::<Value>(body) {
        Ok(payload) => payload
            .get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(ToString::to_string),
        Err(error) => {
            tracing::warn!(status, %error, "failed to parse directory error response");
            None
        }
    };

    match api_message {
        Some(message) => format!("Failed to revoke sessions: {message}"),
        None => format!("Failed to revoke sessions: HTTP {status}"),
    }
}

#[async_trait]
/// Trait contract for `SessionRevoker` behavior.
pub trait SessionRevoker: Send + Sync {
    async fn sign_out(
        &self,
        user_key: &str,
        authorization: &AuthorizationHeader,
    ) -> Result<(), DirectoryError>;
}
