//! Authorization header resolution for the session revocation action.
//!
//! Selects one credential scheme from the job's secrets by fixed precedence and
//! turns it into an `Authorization` header value, running the OAuth2
//! client-credentials exchange when that scheme is configured.

mod client_credentials;
mod resolver;
mod types;

pub use client_credentials::{request_client_credentials_token, ClientCredentialsConfig};
pub use resolver::{resolve_authorization_header, select_auth_scheme};
pub use types::{AuthError, AuthScheme, AuthorizationHeader, ClientAuthStyle};
