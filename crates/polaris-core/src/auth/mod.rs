//! Authentication module for managing the OAuth token and stored credentials.
//!
//! This module provides:
//! - `Credentials`: the token record persisted in `~/.polaris-cli/credentials.json`
//! - `AuthClient`: client-credentials login and token-exchange refresh
//!
//! Tokens are never refreshed automatically; `expires_in` is only reported.

pub mod credentials;
pub mod oauth;

pub use credentials::Credentials;
pub use oauth::{logout, AuthClient, DEFAULT_SCOPE};
