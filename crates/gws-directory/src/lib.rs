//! Admin SDK Directory API client for revoking a user's sessions.
mod client;
mod types;

pub use client::{resolve_base_url, DirectoryClient, DirectoryConfig, DEFAULT_API_BASE};
pub use types::{revocation_failure_message, DirectoryError, SessionRevoker};
