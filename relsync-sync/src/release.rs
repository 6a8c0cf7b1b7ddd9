//! Resolution of the release to reconcile.

use relsync_core::{ConfigError, EventPayload, ReleaseApi, ReleaseId, RepoSlug};

use crate::error::SyncError;

/// The ways a run can name its release, in order of precedence.
///
/// Built by the caller from flags and the triggering event; nothing here
/// reads the process environment.
#[derive(Debug, Clone, Default)]
pub struct ReleaseSelector {
    pub release_id: Option<ReleaseId>,
    pub tag: Option<String>,
    pub event: Option<EventPayload>,
}

/// Resolve `selector` to a release id.
///
/// An explicit id wins, then a tag (one API call), then a release event
/// payload. Fails when none of them yields an id.
pub fn resolve_release<A: ReleaseApi + ?Sized>(
    api: &A,
    repo: &RepoSlug,
    selector: &ReleaseSelector,
) -> Result<ReleaseId, SyncError> {
    if let Some(id) = selector.release_id {
        return Ok(id);
    }
    if let Some(tag) = selector.tag.as_deref().filter(|t| !t.trim().is_empty()) {
        tracing::debug!("looking up release for tag {tag}");
        return api
            .release_by_tag(repo, tag)
            .map_err(|source| SyncError::ReleaseLookup {
                tag: tag.to_owned(),
                source,
            });
    }
    selector
        .event
        .as_ref()
        .and_then(EventPayload::release_id)
        .ok_or(SyncError::Config(ConfigError::ReleaseNotDetermined))
}
