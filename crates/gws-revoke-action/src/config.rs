use gws_core::default_user_agent;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Host-level settings shared by every invocation of the action.
pub struct ActionConfig {
    /// Per-request timeout for both the token exchange and the sign-out call.
    pub request_timeout_ms: u64,
    /// Product identifier sent as `User-Agent`.
    pub user_agent: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }
}

impl ActionConfig {
    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
