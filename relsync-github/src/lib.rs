//! # relsync-github
//!
//! Blocking GitHub REST client implementing [`relsync_core::ReleaseApi`].
//!
//! Works against github.com and GitHub Enterprise Server; the uploads host is
//! derived from the API base URL unless given explicitly.

mod client;
mod error;

pub use client::{derive_upload_url, ClientConfig, GithubClient, DEFAULT_API_URL};
pub use error::ClientError;
