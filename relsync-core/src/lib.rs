//! relsync core library: domain types, input validation and the remote API seam.
//!
//! Public API surface:
//! - [`types`]: newtypes and domain structs
//! - [`error`]: [`ConfigError`]
//! - [`api`]: [`ReleaseApi`] trait, [`ApiError`], paging types
//! - [`inputs`]: parsing of user-supplied configuration values
//! - [`event`]: triggering workflow event payload

pub mod api;
pub mod error;
pub mod event;
pub mod inputs;
pub mod types;

pub use api::{ApiError, AssetInfo, Page, ReleaseApi, UploadRequest, UploadedAsset};
pub use error::ConfigError;
pub use event::EventPayload;
pub use types::{AssetId, LocalFile, ReleaseId, ReleaseTarget, RepoSlug, UploadOutcome};
