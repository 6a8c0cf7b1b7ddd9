//! Error types for relsync-github.

use thiserror::Error;

/// Failures while building a [`crate::GithubClient`].
///
/// Errors of individual API calls are reported as [`relsync_core::ApiError`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL `{0}`: expected http:// or https://")]
    InvalidUrl(String),

    #[error("API token is empty")]
    EmptyToken,
}
