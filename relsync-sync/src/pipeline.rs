//! Sync pipeline entrypoint: delete matching assets, then upload every file.

use relsync_core::{LocalFile, ReleaseApi, ReleaseTarget, UploadOutcome};

use crate::accumulator::UploadResults;
use crate::deletion::delete_matching;
use crate::error::SyncError;
use crate::lister::RemoteAsset;
use crate::pattern::PatternSet;
use crate::upload::upload_file;

/// Fully resolved input of a run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub target: ReleaseTarget,
    /// Files to upload, in output order.
    pub files: Vec<LocalFile>,
    pub delete_patterns: PatternSet,
    /// Replace an existing asset when an upload collides with its name.
    pub overwrite: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Assets removed because they matched a delete mask.
    pub deleted: Vec<RemoteAsset>,
    /// One entry per file, in input order.
    pub uploaded: Vec<UploadOutcome>,
}

/// Run the pipeline for `request`.
///
/// Files are processed strictly one after another. The first unrecoverable
/// error aborts the run and no partial report is returned.
pub fn run<A: ReleaseApi + ?Sized>(api: &A, request: &SyncRequest) -> Result<SyncReport, SyncError> {
    let target = &request.target;
    tracing::info!(
        "syncing {} file(s) to {target} (overwrite: {})",
        request.files.len(),
        request.overwrite
    );

    let deleted = delete_matching(api, target, &request.delete_patterns)?;

    let mut results = UploadResults::with_capacity(request.files.len());
    for file in &request.files {
        let outcome = upload_file(api, target, file, request.overwrite)?;
        tracing::info!("uploaded {} as asset {}", file.asset_name, outcome.id);
        results.push(outcome);
    }

    Ok(SyncReport {
        deleted,
        uploaded: results.into_vec(),
    })
}
