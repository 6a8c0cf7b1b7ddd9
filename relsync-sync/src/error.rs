//! Error types for relsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use relsync_core::{ApiError, AssetId, ConfigError};

/// Every failure that aborts a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid or missing configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A delete mask could not be compiled.
    #[error("invalid delete pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A `files` glob could not be compiled.
    #[error("invalid file pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The release attached to a tag could not be fetched.
    #[error("failed to retrieve release from tag `{tag}`: {source}")]
    ReleaseLookup {
        tag: String,
        #[source]
        source: ApiError,
    },

    /// Enumerating the release's assets failed.
    #[error("failed to list release assets: {0}")]
    List(#[source] ApiError),

    /// Deleting an asset failed for a reason other than it being gone.
    #[error("failed to delete asset `{name}` ({asset_id}): {source}")]
    Delete {
        asset_id: AssetId,
        name: String,
        #[source]
        source: ApiError,
    },

    /// Uploading a file failed and no retry path remained.
    #[error("failed to upload `{name}`: {source}")]
    Upload {
        name: String,
        #[source]
        source: ApiError,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
