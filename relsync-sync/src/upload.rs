//! Per-file upload state machine.
//!
//! ```text
//!             ┌──────────── transient error, budget left ─────────────┐
//!             v                                                       │
//!   ──▶ Uploading ──ok──▶ Uploaded                                    │
//!             │  └──────── 422, overwrite, no delete yet ──▶ ResolvingConflict
//!             │                                                │
//!             │  ◀──── conflicting asset deleted ──────────────┤
//!             │  ◀──── asset not found, first miss ────────────┤
//!             └── anything else ──▶ failed (run aborts)  ◀─────┘ second miss
//! ```
//!
//! Every edge back to `Uploading` consumes either the single server retry,
//! the single conflict delete or the single lookup-miss allowance, so a file
//! is attempted at most [`MAX_ATTEMPTS`] times.

use relsync_core::{ApiError, LocalFile, ReleaseApi, ReleaseTarget, UploadOutcome, UploadRequest};

use crate::deletion::delete_if_present;
use crate::error::{io_err, SyncError};
use crate::lister::find_by_stored_name;
use crate::normalize::normalize_asset_name;

/// Upper bound on upload attempts for one file.
pub const MAX_ATTEMPTS: usize = 4;

const SERVER_RETRY_BUDGET: u8 = 1;

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Retry allowances of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Budget {
    server_retries: u8,
    conflict_delete_attempted: bool,
    missing_lookup_retried: bool,
}

/// Decision taken after a failed upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Next {
    ResolveConflict,
    Retry,
    Fail,
}

impl Budget {
    pub(crate) fn new() -> Self {
        Self {
            server_retries: SERVER_RETRY_BUDGET,
            conflict_delete_attempted: false,
            missing_lookup_retried: false,
        }
    }

    pub(crate) fn after_upload_error(&mut self, err: &ApiError, overwrite: bool) -> Next {
        if err.is_conflict() && overwrite && !self.conflict_delete_attempted {
            return Next::ResolveConflict;
        }
        if err.is_transient() && self.server_retries > 0 {
            self.server_retries -= 1;
            return Next::Retry;
        }
        Next::Fail
    }

    pub(crate) fn record_conflict_delete(&mut self) {
        self.conflict_delete_attempted = true;
    }

    /// Consume the one retry granted when the conflicting asset was not found.
    pub(crate) fn take_missing_lookup_retry(&mut self) -> bool {
        !std::mem::replace(&mut self.missing_lookup_retried, true)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum State {
    Uploading,
    ResolvingConflict(ApiError),
    Uploaded(UploadOutcome),
}

/// Upload one file, resolving a name conflict and one transient failure.
///
/// With `overwrite` set, a conflicting asset is deleted and the upload
/// retried once. Any error left unresolved is returned and must abort the
/// run.
pub fn upload_file<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    file: &LocalFile,
    overwrite: bool,
) -> Result<UploadOutcome, SyncError> {
    tracing::info!("uploading {}", file.path.display());

    let mut budget = Budget::new();
    let mut state = State::Uploading;
    loop {
        state = match state {
            State::Uploading => match attempt_upload(api, target, file)? {
                Ok(outcome) => State::Uploaded(outcome),
                Err(err) => match budget.after_upload_error(&err, overwrite) {
                    Next::ResolveConflict => State::ResolvingConflict(err),
                    Next::Retry => {
                        tracing::warn!("upload of {} failed ({err}); retrying", file.asset_name);
                        State::Uploading
                    }
                    Next::Fail => return Err(upload_failed(file, err)),
                },
            },
            State::ResolvingConflict(conflict) => {
                resolve_conflict(api, target, file, &mut budget, conflict)?
            }
            State::Uploaded(outcome) => return Ok(outcome),
        };
    }
}

fn attempt_upload<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    file: &LocalFile,
) -> Result<Result<UploadOutcome, ApiError>, SyncError> {
    let body = std::fs::read(&file.path).map_err(|e| io_err(&file.path, e))?;
    let actual = body.len() as u64;
    if actual != file.size_bytes {
        tracing::warn!(
            "{} changed size since it was resolved ({} -> {actual} bytes)",
            file.path.display(),
            file.size_bytes
        );
    }
    let request = UploadRequest {
        name: &file.asset_name,
        content_type: &file.mime_type,
        content_length: actual,
        body: &body,
    };
    Ok(api.upload_asset(target, &request).map(|asset| UploadOutcome {
        id: asset.id,
        url: asset.browser_download_url,
    }))
}

fn resolve_conflict<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    file: &LocalFile,
    budget: &mut Budget,
    conflict: ApiError,
) -> Result<State, SyncError> {
    let stored_name = normalize_asset_name(&file.asset_name);
    let existing = find_by_stored_name(api, target, &stored_name).map_err(SyncError::List)?;

    match existing {
        Some(asset) => {
            tracing::warn!(
                "{} already exists as {} ({}); replacing it",
                file.asset_name,
                asset.name,
                asset.id
            );
            delete_if_present(api, &target.repo, &asset)?;
            budget.record_conflict_delete();
            Ok(State::Uploading)
        }
        None if budget.take_missing_lookup_retry() => {
            tracing::warn!(
                "{} conflicted but no asset named {stored_name} was found; retrying once",
                file.asset_name
            );
            Ok(State::Uploading)
        }
        None => Err(upload_failed(file, conflict)),
    }
}

fn upload_failed(file: &LocalFile, source: ApiError) -> SyncError {
    SyncError::Upload {
        name: file.asset_name.clone(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
