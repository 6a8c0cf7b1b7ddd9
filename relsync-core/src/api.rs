//! The remote API seam.
//!
//! The reconciliation engine only talks to the platform through
//! [`ReleaseApi`]. The production implementation lives in `relsync-github`;
//! tests drive the engine with in-memory fakes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AssetId, ReleaseId, ReleaseTarget, RepoSlug};

/// Items per page requested when listing assets.
pub const PAGE_SIZE: u32 = 100;

/// HTTP status the platform answers with when an asset name is already taken.
pub const STATUS_CONFLICT: u16 = 422;

const STATUS_NOT_FOUND: u16 = 404;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// No response was received (connection, TLS, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// 404, or a server message of exactly `Not Found`.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, message } => {
                *status == STATUS_NOT_FOUND || message == "Not Found"
            }
            Self::Transport(_) => false,
        }
    }

    /// The requested asset name already exists on the release.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(STATUS_CONFLICT)
    }

    /// Statusless failures and 5xx answers are worth one more try.
    pub fn is_transient(&self) -> bool {
        self.status().map_or(true, |s| s >= 500)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// An asset as reported by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: AssetId,
    pub name: String,
}

/// Response of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub id: AssetId,
    pub name: String,
    pub browser_download_url: String,
}

/// Everything needed for a single upload attempt.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    pub name: &'a str,
    pub content_type: &'a str,
    pub content_length: u64,
    pub body: &'a [u8],
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The subset of the platform's release API consumed by the engine.
///
/// Calls are blocking; the engine keeps at most one outstanding.
pub trait ReleaseApi {
    /// Resolve a tag to the id of the release attached to it.
    fn release_by_tag(&self, repo: &RepoSlug, tag: &str) -> Result<ReleaseId, ApiError>;

    /// Fetch one page of assets. Pages are numbered from 1.
    fn list_assets_page(
        &self,
        target: &ReleaseTarget,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AssetInfo>, ApiError>;

    fn delete_asset(&self, repo: &RepoSlug, asset_id: AssetId) -> Result<(), ApiError>;

    fn upload_asset(
        &self,
        target: &ReleaseTarget,
        request: &UploadRequest<'_>,
    ) -> Result<UploadedAsset, ApiError>;
}

impl<T: ReleaseApi + ?Sized> ReleaseApi for &T {
    fn release_by_tag(&self, repo: &RepoSlug, tag: &str) -> Result<ReleaseId, ApiError> {
        (**self).release_by_tag(repo, tag)
    }

    fn list_assets_page(
        &self,
        target: &ReleaseTarget,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AssetInfo>, ApiError> {
        (**self).list_assets_page(target, page, per_page)
    }

    fn delete_asset(&self, repo: &RepoSlug, asset_id: AssetId) -> Result<(), ApiError> {
        (**self).delete_asset(repo, asset_id)
    }

    fn upload_asset(
        &self,
        target: &ReleaseTarget,
        request: &UploadRequest<'_>,
    ) -> Result<UploadedAsset, ApiError> {
        (**self).upload_asset(target, request)
    }
}
