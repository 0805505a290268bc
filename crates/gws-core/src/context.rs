use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

pub const ENV_ADDRESS: &str = "ADDRESS";
pub const ENV_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL: &str = "OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL";
pub const ENV_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID: &str = "OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID";
pub const ENV_OAUTH2_CLIENT_CREDENTIALS_SCOPE: &str = "OAUTH2_CLIENT_CREDENTIALS_SCOPE";
pub const ENV_OAUTH2_CLIENT_CREDENTIALS_AUDIENCE: &str = "OAUTH2_CLIENT_CREDENTIALS_AUDIENCE";
pub const ENV_OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE: &str = "OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE";

pub const SECRET_BEARER_AUTH_TOKEN: &str = "BEARER_AUTH_TOKEN";
pub const SECRET_BASIC_USERNAME: &str = "BASIC_USERNAME";
pub const SECRET_BASIC_PASSWORD: &str = "BASIC_PASSWORD";
pub const SECRET_OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN: &str =
    "OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN";
pub const SECRET_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET: &str =
    "OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET";

#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Environment and secret bags handed to the action by the job framework.
///
/// Values that are empty or whitespace-only are treated as absent by the
/// lookup helpers. The [`Debug`] impl lists secret keys but never their values.
pub struct ExecutionContext {
    pub environment: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), value.into());
        self
    }

    pub fn environment_value(&self, key: &str) -> Option<&str> {
        present(self.environment.get(key))
    }

    pub fn secret(&self, key: &str) -> Option<&str> {
        present(self.secrets.get(key))
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("environment", &self.environment)
            .field("secrets", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}
