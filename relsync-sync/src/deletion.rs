//! Pre-upload removal of assets matching the delete masks.
//!
//! The release is enumerated completely before anything is deleted, so
//! deletions cannot shift the pages still being read.

use relsync_core::{ReleaseApi, ReleaseTarget, RepoSlug};

use crate::error::SyncError;
use crate::lister::{list_assets, RemoteAsset};
use crate::pattern::PatternSet;

/// Delete `asset`, treating "not found" as success.
pub fn delete_if_present<A: ReleaseApi + ?Sized>(
    api: &A,
    repo: &RepoSlug,
    asset: &RemoteAsset,
) -> Result<(), SyncError> {
    match api.delete_asset(repo, asset.id) {
        Ok(()) => Ok(()),
        Err(err) if err.is_not_found() => {
            tracing::warn!("asset {} ({}) already gone", asset.name, asset.id);
            Ok(())
        }
        Err(source) => Err(SyncError::Delete {
            asset_id: asset.id,
            name: asset.name.clone(),
            source,
        }),
    }
}

/// Every asset of the target matched by at least one mask, in listing order.
pub fn plan_deletions<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    patterns: &PatternSet,
) -> Result<Vec<RemoteAsset>, SyncError> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }
    let mut planned = Vec::new();
    for asset in list_assets(api, target) {
        let asset = asset.map_err(SyncError::List)?;
        if let Some(pattern) = patterns.find_match(&asset.name) {
            tracing::debug!("{} matches delete mask `{}`", asset.name, pattern.as_str());
            planned.push(asset);
        }
    }
    Ok(planned)
}

/// Delete every asset matched by `patterns`, sequentially.
///
/// Returns the assets that were scheduled. Does nothing, not even a listing,
/// when no mask is configured.
pub fn delete_matching<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    patterns: &PatternSet,
) -> Result<Vec<RemoteAsset>, SyncError> {
    let planned = plan_deletions(api, target, patterns)?;
    for asset in &planned {
        tracing::info!("deleting asset {} ({})", asset.name, asset.id);
        delete_if_present(api, &target.repo, asset)?;
    }
    if !planned.is_empty() {
        tracing::info!("deleted {} asset(s) matching delete masks", planned.len());
    }
    Ok(planned)
}


#[cfg(test)]
mod tests {
    use relsync_core::{
        ApiError, AssetId, AssetInfo, Page, ReleaseId, UploadRequest, UploadedAsset,
    };

    use super::*;

    /// Answers every delete with a fixed result.
    struct DeleteAnswer(Result<(), ApiError>);

    impl ReleaseApi for DeleteAnswer {
        fn release_by_tag(&self, _: &RepoSlug, _: &str) -> Result<ReleaseId, ApiError> {
            unreachable!()
        }

        fn list_assets_page(
            &self,
            _: &ReleaseTarget,
            _: u32,
            _: u32,
        ) -> Result<Page<AssetInfo>, ApiError> {
            unreachable!()
        }

        fn delete_asset(&self, _: &RepoSlug, _: AssetId) -> Result<(), ApiError> {
            self.0.clone()
        }

        fn upload_asset(
            &self,
            _: &ReleaseTarget,
            _: &UploadRequest<'_>,
        ) -> Result<UploadedAsset, ApiError> {
            unreachable!()
        }
    }

    fn repo() -> RepoSlug {
        RepoSlug {
            owner: "octo".into(),
            repo: "hello".into(),
        }
    }

    fn asset() -> RemoteAsset {
        RemoteAsset::from(AssetInfo {
            id: AssetId(7),
            name: "old.zip".into(),
        })
    }

    fn status(status: u16, message: &str) -> ApiError {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }

    #[test]
    fn missing_asset_counts_as_deleted() {
        let api = DeleteAnswer(Err(status(404, "Not Found")));
        assert!(delete_if_present(&api, &repo(), &asset()).is_ok());

        let api = DeleteAnswer(Err(status(410, "Not Found")));
        assert!(delete_if_present(&api, &repo(), &asset()).is_ok());
    }

    #[test]
    fn other_failures_name_the_asset() {
        let api = DeleteAnswer(Err(status(403, "Resource not accessible")));
        let err = delete_if_present(&api, &repo(), &asset()).unwrap_err();
        assert!(
            matches!(err, SyncError::Delete { asset_id: AssetId(7), ref name, .. } if name == "old.zip"),
            "got: {err}"
        );
    }

    #[test]
    fn no_masks_skips_listing() {
        let api = DeleteAnswer(Ok(()));
        let target = ReleaseTarget::new(repo(), ReleaseId(1));
        let planned = plan_deletions(&api, &target, &PatternSet::default()).unwrap();
        assert!(planned.is_empty());
    }
}
