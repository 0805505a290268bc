use gws_core::{
    ExecutionContext, SECRET_BASIC_PASSWORD, SECRET_BASIC_USERNAME, SECRET_BEARER_AUTH_TOKEN,
    SECRET_OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN, SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET,
};

use crate::client_credentials::{request_client_credentials_token, ClientCredentialsConfig};
use crate::types::{AuthError, AuthScheme, AuthorizationHeader};

enum SelectedCredential<'a> {
    Bearer(&'a str),
    Basic { username: &'a str, password: &'a str },
    AuthorizationCode(&'a str),
    ClientCredentials,
}

impl SelectedCredential<'_> {
    fn scheme(&self) -> AuthScheme {
        match self {
            SelectedCredential::Bearer(_) => AuthScheme::Bearer,
            SelectedCredential::Basic { .. } => AuthScheme::Basic,
            SelectedCredential::AuthorizationCode(_) => AuthScheme::OAuth2AuthorizationCode,
            SelectedCredential::ClientCredentials => AuthScheme::OAuth2ClientCredentials,
        }
    }
}

type CredentialDetector = for<'a> fn(&'a ExecutionContext) -> Option<SelectedCredential<'a>>;

// First match wins.
const CREDENTIAL_PRECEDENCE: &[CredentialDetector] = &[
    detect_bearer_token,
    detect_basic_credentials,
    detect_authorization_code_token,
    detect_client_credentials,
];

fn detect_bearer_token(context: &ExecutionContext) -> Option<SelectedCredential<'_>> {
    context
        .secret(SECRET_BEARER_AUTH_TOKEN)
        .map(SelectedCredential::Bearer)
}

fn detect_basic_credentials(context: &ExecutionContext) -> Option<SelectedCredential<'_>> {
    let username = context.secret(SECRET_BASIC_USERNAME)?;
    let password = context.secret(SECRET_BASIC_PASSWORD)?;
    Some(SelectedCredential::Basic { username, password })
}

fn detect_authorization_code_token(context: &ExecutionContext) -> Option<SelectedCredential<'_>> {
    context
        .secret(SECRET_OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN)
        .map(SelectedCredential::AuthorizationCode)
}

fn detect_client_credentials(context: &ExecutionContext) -> Option<SelectedCredential<'_>> {
    context
        .secret(SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET)
        .map(|_| SelectedCredential::ClientCredentials)
}

fn select_credential(context: &ExecutionContext) -> Option<SelectedCredential<'_>> {
    CREDENTIAL_PRECEDENCE
        .iter()
        .find_map(|detect| detect(context))
}

/// Reports which scheme [`resolve_authorization_header`] would use, without
/// contacting any token endpoint.
pub fn select_auth_scheme(context: &ExecutionContext) -> AuthScheme {
    select_credential(context)
        .map(|credential| credential.scheme())
        .unwrap_or(AuthScheme::None)
}

/// Builds the `Authorization` header for one invocation.
///
/// Secrets are checked in order: bearer token, basic username/password,
/// authorization-code access token, client-credentials secret. The first
/// match is used; when nothing matches the returned header is empty.
pub async fn resolve_authorization_header(
    http: &reqwest::Client,
    context: &ExecutionContext,
    user_agent: &str,
) -> Result<AuthorizationHeader, AuthError> {
    let Some(credential) = select_credential(context) else {
        tracing::debug!(
            auth_scheme = AuthScheme::None.as_str(),
            "no credentials configured"
        );
        return Ok(AuthorizationHeader::none());
    };
    tracing::debug!(
        auth_scheme = credential.scheme().as_str(),
        "authorization scheme selected"
    );

    match credential {
        SelectedCredential::Bearer(token) | SelectedCredential::AuthorizationCode(token) => {
            Ok(AuthorizationHeader::bearer(token))
        }
        SelectedCredential::Basic { username, password } => {
            Ok(AuthorizationHeader::basic(username, password))
        }
        SelectedCredential::ClientCredentials => {
            let config = ClientCredentialsConfig::from_context(context)?;
            let access_token = request_client_credentials_token(http, &config, user_agent).await?;
            Ok(AuthorizationHeader::bearer(&access_token))
        }
    }
}
