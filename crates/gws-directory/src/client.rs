use std::time::Duration;

use async_trait::async_trait;
use gws_auth::AuthorizationHeader;
use gws_core::{ExecutionContext, ENV_ADDRESS};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::types::{revocation_failure_message, DirectoryError, SessionRevoker};

pub const DEFAULT_API_BASE: &str = "https://admin.googleapis.com";

/// Picks the API base URL: explicit `address`, then `ADDRESS`, then the Google default.
///
/// Surrounding whitespace and trailing slashes are removed.
pub fn resolve_base_url(address: Option<&str>, context: &ExecutionContext) -> String {
    let candidate = address
        .filter(|value| !value.trim().is_empty())
        .or_else(|| context.environment_value(ENV_ADDRESS))
        .unwrap_or(DEFAULT_API_BASE);
    candidate.trim().trim_end_matches('/').to_string()
}

#[derive(Debug, Clone)]
/// Public struct `DirectoryConfig` used by the revocation action.
pub struct DirectoryConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl DirectoryConfig {
    pub fn from_context(
        address: Option<&str>,
        context: &ExecutionContext,
        request_timeout_ms: u64,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            api_base: resolve_base_url(address, context),
            request_timeout_ms,
            user_agent: user_agent.into(),
        }
    }
}

#[derive(Debug, Clone)]
/// Public struct `DirectoryClient` used by the revocation action.
pub struct DirectoryClient {
    http: reqwest::Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Reuses an existing HTTP client, e.g. the one that fetched the OAuth2 token.
    pub fn with_http_client(config: DirectoryConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn sign_out_url(&self, user_key: &str) -> String {
        format!(
            "{}/admin/directory/v1/users/{}/signOut",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(user_key)
        )
    }

    /// Builds the bodiless sign-out POST; no `Authorization` header when `authorization` is empty.
    pub fn build_sign_out_request(
        &self,
        user_key: &str,
        authorization: &AuthorizationHeader,
    ) -> Result<reqwest::Request, DirectoryError> {
        let mut request = self
            .http
            .post(self.sign_out_url(user_key))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.config.user_agent.as_str());
        if !authorization.is_empty() {
            let mut value = HeaderValue::from_str(authorization.as_str())?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request.build()?)
    }
}

#[async_trait]
impl SessionRevoker for DirectoryClient {
    async fn sign_out(
        &self,
        user_key: &str,
        authorization: &AuthorizationHeader,
    ) -> Result<(), DirectoryError> {
        let request = self.build_sign_out_request(user_key, authorization)?;
        tracing::debug!(
            user_key,
            base_url = self.config.api_base.as_str(),
            "sending directory sign-out request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(user_key, status = status.as_u16(), "directory sign-out accepted");
            return Ok(());
        }

        let raw = response.text().await.unwrap_or_default();
        let message = revocation_failure_message(status.as_u16(), &raw);
        tracing::warn!(
            user_key,
            status = status.as_u16(),
            body = raw.as_str(),
            "directory sign-out rejected"
        );
        Err(DirectoryError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
