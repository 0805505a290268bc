//! Foundational types shared by the Google Workspace session revocation crates.
//!
//! Provides the job execution context (environment and secret bags), the
//! context key names the action reads, and ISO-8601 timestamp helpers used
//! when shaping job results.

pub mod context;
pub mod time_utils;

pub use context::{
    ExecutionContext, ENV_ADDRESS, ENV_OAUTH2_CLIENT_CREDENTIALS_AUDIENCE,
    ENV_OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE, ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID,
    ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE, ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL,
    SECRET_BASIC_PASSWORD, SECRET_BASIC_USERNAME, SECRET_BEARER_AUTH_TOKEN,
    SECRET_OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN, SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET,
};
pub use time_utils::{current_iso8601_timestamp, format_iso8601};

/// Returns the product identifier sent as `User-Agent` on every outbound request.
pub fn default_user_agent() -> String {
    format!("gws-revoke-session/{}", env!("CARGO_PKG_VERSION"))
}
