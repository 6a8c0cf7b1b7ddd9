//! # relsync-sync
//!
//! Release asset reconciliation engine.
//!
//! Call [`pipeline::run`] with a resolved [`SyncRequest`] to delete assets
//! matching the configured masks and upload every local file, resolving name
//! conflicts and transient server errors along the way. The helpers in
//! [`release`] and [`files`] turn raw inputs into that request.

pub mod accumulator;
pub mod deletion;
pub mod error;
pub mod files;
pub mod lister;
pub mod normalize;
pub mod pattern;
pub mod pipeline;
pub mod release;
pub mod upload;

pub use accumulator::UploadResults;
pub use error::SyncError;
pub use lister::RemoteAsset;
pub use normalize::normalize_asset_name;
pub use pattern::{DeletePattern, PatternSet};
pub use pipeline::{run, SyncReport, SyncRequest};
pub use release::{resolve_release, ReleaseSelector};
