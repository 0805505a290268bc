//! Job handler that signs a Google Workspace user out of every web and device session.
//!
//! The job framework calls [`RevokeSessionAction::invoke`] with the job
//! parameters and an [`ExecutionContext`], then [`RevokeSessionAction::error`]
//! after a failed attempt and [`RevokeSessionAction::halt`] on cancellation.
//! Retry and scheduling decisions stay with the framework.

mod bootstrap_helpers;
mod config;
mod handlers;
mod types;

pub use bootstrap_helpers::init_tracing;
pub use config::{ActionConfig, DEFAULT_REQUEST_TIMEOUT_MS};
pub use gws_core::ExecutionContext;
pub use handlers::RevokeSessionAction;
pub use types::{ActionError, HaltResult, RevocationResult, RevokeSessionParams, UNKNOWN_USER_KEY};
