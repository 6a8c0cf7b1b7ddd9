//! Lazy, restartable enumeration of a release's assets.
//!
//! [`list_assets`] returns an iterator that fetches pages of
//! [`PAGE_SIZE`] on demand. Nothing is cached between calls: every call site
//! starts again from the first page and sees the server's current state.

use relsync_core::api::PAGE_SIZE;
use relsync_core::{ApiError, AssetId, AssetInfo, ReleaseApi, ReleaseTarget};

use crate::normalize::normalize_asset_name;

/// An asset currently attached to the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    pub id: AssetId,
    /// Name as stored by the server.
    pub name: String,
    /// `name` run through [`normalize_asset_name`].
    pub normalized_name: String,
}

impl From<AssetInfo> for RemoteAsset {
    fn from(info: AssetInfo) -> Self {
        let normalized_name = normalize_asset_name(&info.name);
        Self {
            id: info.id,
            name: info.name,
            normalized_name,
        }
    }
}

/// Iterator over every asset of a release, one page request at a time.
///
/// Yields at most one `Err`; iteration ends after it.
pub struct AssetPages<'a, A: ReleaseApi + ?Sized> {
    api: &'a A,
    target: &'a ReleaseTarget,
    next_page: u32,
    buffer: std::vec::IntoIter<AssetInfo>,
    exhausted: bool,
}

impl<'a, A: ReleaseApi + ?Sized> AssetPages<'a, A> {
    fn new(api: &'a A, target: &'a ReleaseTarget) -> Self {
        Self {
            api,
            target,
            next_page: 1,
            buffer: Vec::new().into_iter(),
            exhausted: false,
        }
    }
}

impl<A: ReleaseApi + ?Sized> Iterator for AssetPages<'_, A> {
    type Item = Result<RemoteAsset, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(info) = self.buffer.next() {
                return Some(Ok(info.into()));
            }
            if self.exhausted {
                return None;
            }
            tracing::debug!("listing assets of {} (page {})", self.target, self.next_page);
            match self
                .api
                .list_assets_page(self.target, self.next_page, PAGE_SIZE)
            {
                Ok(page) => {
                    self.next_page += 1;
                    // An empty page ends the listing even if the server claims more.
                    self.exhausted = !page.has_more || page.items.is_empty();
                    self.buffer = page.items.into_iter();
                }
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Start a fresh enumeration of the target's assets.
pub fn list_assets<'a, A: ReleaseApi + ?Sized>(
    api: &'a A,
    target: &'a ReleaseTarget,
) -> AssetPages<'a, A> {
    AssetPages::new(api, target)
}

/// First asset whose stored name equals `stored_name`; stops paging once found.
pub fn find_by_stored_name<A: ReleaseApi + ?Sized>(
    api: &A,
    target: &ReleaseTarget,
    stored_name: &str,
) -> Result<Option<RemoteAsset>, ApiError> {
    for asset in list_assets(api, target) {
        let asset = asset?;
        if asset.name == stored_name {
            return Ok(Some(asset));
        }
    }
    Ok(None)
}
