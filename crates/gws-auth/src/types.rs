use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `AuthScheme` values in precedence order.
pub enum AuthScheme {
    Bearer,
    Basic,
    OAuth2AuthorizationCode,
    OAuth2ClientCredentials,
    None,
}

impl AuthScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthScheme::Bearer => "bearer",
            AuthScheme::Basic => "basic",
            AuthScheme::OAuth2AuthorizationCode => "oauth2_authorization_code",
            AuthScheme::OAuth2ClientCredentials => "oauth2_client_credentials",
            AuthScheme::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where OAuth2 client credentials travel on the token request.
pub enum ClientAuthStyle {
    /// `client_id` and `client_secret` are form fields.
    InParams,
    /// `client_id` and `client_secret` are sent as HTTP Basic credentials.
    #[default]
    InHeader,
}

impl ClientAuthStyle {
    /// Only the literal `InParams` selects body transmission.
    pub fn from_config_value(value: Option<&str>) -> Self {
        match value {
            Some("InParams") => ClientAuthStyle::InParams,
            _ => ClientAuthStyle::InHeader,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
/// Ready-to-send `Authorization` header value; empty when no scheme matched.
pub struct AuthorizationHeader(String);

impl AuthorizationHeader {
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Prefixes `Bearer ` unless the token already carries it.
    pub fn bearer(token: &str) -> Self {
        if token.starts_with(BEARER_PREFIX) {
            Self(token.to_string())
        } else {
            Self(format!("{BEARER_PREFIX}{token}"))
        }
    }

    pub fn basic(username: &str, password: &str) -> Self {
        let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
        Self(format!("Basic {encoded}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.0.split_whitespace().next().unwrap_or("");
        if scheme.is_empty() {
            f.write_str("AuthorizationHeader(<none>)")
        } else {
            write!(f, "AuthorizationHeader({scheme} [REDACTED])")
        }
    }
}

#[derive(Debug, Error)]
/// Enumerates supported `AuthError` values.
pub enum AuthError {
    #[error("OAuth2 Client Credentials flow requires TOKEN_URL and CLIENT_ID in env (missing {0})")]
    MissingConfig(&'static str),
    #[error("OAuth2 token request failed: {status} {status_text} - {body}")]
    TokenEndpointStatus {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("No access_token in OAuth2 response")]
    MissingAccessToken,
    #[error("invalid OAuth2 token response: {0}")]
    InvalidTokenResponse(#[from] serde_json::Error),
    #[error("OAuth2 token request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AuthError {
    /// HTTP status reported by the token endpoint, when it answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthError::TokenEndpointStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
