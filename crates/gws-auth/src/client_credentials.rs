use std::fmt;

use gws_core::{
    ExecutionContext, ENV_OAUTH2_CLIENT_CREDENTIALS_AUDIENCE,
    ENV_OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE, ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID,
    ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE, ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL,
    SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET,
};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::types::{AuthError, ClientAuthStyle};

#[derive(Clone, PartialEq, Eq)]
/// Settings for one OAuth2 client-credentials token exchange.
pub struct ClientCredentialsConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: Option<String>,
    pub audience: Option<String>,
    pub auth_style: ClientAuthStyle,
}

impl ClientCredentialsConfig {
    /// Reads the endpoint settings from the environment and the secret from secrets.
    pub fn from_context(context: &ExecutionContext) -> Result<Self, AuthError> {
        let client_secret = context
            .secret(SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET)
            .ok_or(AuthError::MissingConfig(
                SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET,
            ))?;
        let token_url = context
            .environment_value(ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL)
            .ok_or(AuthError::MissingConfig(
                ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL,
            ))?;
        let client_id = context
            .environment_value(ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID)
            .ok_or(AuthError::MissingConfig(
                ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID,
            ))?;

        Ok(Self {
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            scope: context
                .environment_value(ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE)
                .map(ToString::to_string),
            audience: context
                .environment_value(ENV_OAUTH2_CLIENT_CREDENTIALS_AUDIENCE)
                .map(ToString::to_string),
            auth_style: ClientAuthStyle::from_config_value(
                context.environment_value(ENV_OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE),
            ),
        })
    }

    /// Form fields for the token request body, in wire order.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![("grant_type", "client_credentials")];
        if let Some(scope) = self.scope.as_deref() {
            fields.push(("scope", scope));
        }
        if let Some(audience) = self.audience.as_deref() {
            fields.push(("audience", audience));
        }
        if self.auth_style == ClientAuthStyle::InParams {
            fields.push(("client_id", self.client_id.as_str()));
            fields.push(("client_secret", self.client_secret.as_str()));
        }
        fields
    }
}

impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("audience", &self.audience)
            .field("auth_style", &self.auth_style)
            .finish()
    }
}

/// Exchanges client credentials for an access token.
///
/// Returns the raw `access_token`; callers wrap it into a bearer header.
pub async fn request_client_credentials_token(
    http: &reqwest::Client,
    config: &ClientCredentialsConfig,
    user_agent: &str,
) -> Result<String, AuthError> {
    tracing::debug!(
        token_url = config.token_url.as_str(),
        auth_style = ?config.auth_style,
        "requesting oauth2 client credentials token"
    );

    let mut request = http
        .post(&config.token_url)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, user_agent)
        .form(&config.form_fields());
    if config.auth_style == ClientAuthStyle::InHeader {
        request = request.basic_auth(&config.client_id, Some(&config.client_secret));
    }

    let response = request.send().await?;
    let status = response.status();
    let raw = response.text().await?;
    if !status.is_success() {
        let body = match serde_json::from_str::<Value>(&raw) {
            Ok(payload) => payload.to_string(),
            Err(_) => raw,
        };
        return Err(AuthError::TokenEndpointStatus {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        });
    }

    let payload: Value = serde_json::from_str(&raw)?;
    payload
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .ok_or(AuthError::MissingAccessToken)
}
