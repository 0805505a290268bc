use std::time::Duration;

use gws_auth::{resolve_authorization_header, AuthorizationHeader};
use gws_core::ExecutionContext;
use gws_directory::{DirectoryClient, DirectoryConfig, SessionRevoker};
use serde_json::Value;

use crate::config::ActionConfig;
use crate::types::{
    ActionError, HaltResult, RevocationResult, RevokeSessionParams, UNKNOWN_USER_KEY,
};

#[derive(Debug, Clone, Default)]
/// Lifecycle handlers for the Google session revocation job.
pub struct RevokeSessionAction {
    config: ActionConfig,
}

impl RevokeSessionAction {
    pub fn new(config: ActionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Signs the user named by `params.userKey` out of all sessions.
    ///
    /// Parameters are validated before any network call. Credentials are
    /// resolved fresh and at most one token exchange precedes the sign-out.
    pub async fn invoke(
        &self,
        params: &Value,
        context: &ExecutionContext,
    ) -> Result<RevocationResult, ActionError> {
        let params = RevokeSessionParams::from_value(params)?;
        tracing::info!(
            user_key = params.user_key.as_str(),
            "starting google session revocation"
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.config.request_timeout_ms.max(1)))
            .build()
            .map_err(ActionError::HttpClient)?;
        let authorization =
            resolve_authorization_header(&http, context, &self.config.user_agent).await?;
        let directory = DirectoryClient::with_http_client(
            DirectoryConfig::from_context(
                params.address.as_deref(),
                context,
                self.config.request_timeout_ms,
                self.config.user_agent.as_str(),
            ),
            http,
        );
        tracing::debug!(
            user_key = params.user_key.as_str(),
            base_url = directory.config().api_base.as_str(),
            "resolved directory api base url"
        );

        revoke_with(&directory, params, &authorization).await
    }

    /// Logs a failed attempt and hands the same failure back to the framework.
    pub async fn error(
        &self,
        failure: ActionError,
        params: &Value,
        _context: &ExecutionContext,
    ) -> Result<RevocationResult, ActionError> {
        let user_key = params
            .get("userKey")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_USER_KEY);
        tracing::error!(
            user_key,
            status = failure.status_code(),
            retryable = failure.is_retryable(),
            error = %failure,
            "session revocation failed"
        );
        Err(failure)
    }

    /// Reports a clean shutdown. The sign-out is a single POST, so there is
    /// nothing to roll back.
    pub async fn halt(&self, params: &Value, _context: &ExecutionContext) -> HaltResult {
        let result = HaltResult::from_params(params);
        tracing::info!(
            user_key = result.user_key.as_str(),
            reason = result.reason.as_deref().unwrap_or_default(),
            "session revocation job halted"
        );
        result
    }
}

async fn revoke_with(
    revoker: &dyn SessionRevoker,
    params: RevokeSessionParams,
    authorization: &AuthorizationHeader,
) -> Result<RevocationResult, ActionError> {
    revoker.sign_out(&params.user_key, authorization).await?;
    tracing::info!(
        user_key = params.user_key.as_str(),
        "successfully revoked sessions"
    );
    Ok(RevocationResult::revoked(params.user_key, params.google_domain))
}
