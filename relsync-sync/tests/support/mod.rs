//! In-memory release that behaves like the remote service: stored names are
//! sanitized, duplicate names are rejected with 422, deleting an unknown
//! asset answers 404. Failures can be scripted per upload attempt.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use relsync_core::{
    ApiError, AssetId, AssetInfo, LocalFile, Page, ReleaseApi, ReleaseId, ReleaseTarget,
    RepoSlug, UploadRequest, UploadedAsset,
};
use relsync_sync::{files::describe_file, normalize_asset_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Tag(String),
    List(u32),
    Delete(AssetId),
    Upload(String),
}

#[derive(Default)]
struct State {
    assets: Vec<AssetInfo>,
    next_id: u64,
    tags: HashMap<String, u64>,
    /// Consumed one per upload call; `None` means normal behavior.
    upload_script: VecDeque<Option<ApiError>>,
    delete_faults: HashMap<AssetId, ApiError>,
    list_fault: Option<ApiError>,
    /// Names left out of listings (asset exists but is not visible yet).
    hidden: HashSet<String>,
    /// Names left out of a limited number of upcoming list calls.
    hidden_for: HashMap<String, u32>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeRelease {
    state: RefCell<State>,
}

pub fn status(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

pub fn conflict() -> ApiError {
    status(422, "Validation Failed")
}

impl FakeRelease {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().next_id = 1000;
        fake
    }

    pub fn with_assets(names: &[&str]) -> Self {
        let fake = Self::new();
        for name in names {
            fake.add_asset(name);
        }
        fake
    }

    pub fn add_asset(&self, name: &str) -> AssetId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = AssetId(state.next_id);
        state.assets.push(AssetInfo {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn add_tag(&self, tag: &str, release: u64) {
        self.state.borrow_mut().tags.insert(tag.to_string(), release);
    }

    pub fn script_uploads(&self, script: Vec<Option<ApiError>>) {
        self.state.borrow_mut().upload_script = script.into();
    }

    pub fn fail_delete(&self, id: AssetId, err: ApiError) {
        self.state.borrow_mut().delete_faults.insert(id, err);
    }

    pub fn fail_listing(&self, err: ApiError) {
        self.state.borrow_mut().list_fault = Some(err);
    }

    pub fn hide(&self, name: &str) {
        self.state.borrow_mut().hidden.insert(name.to_string());
    }

    /// Leave `name` out of the next `listings` list calls only.
    pub fn hide_for(&self, name: &str, listings: u32) {
        self.state
            .borrow_mut()
            .hidden_for
            .insert(name.to_string(), listings);
    }

    pub fn names(&self) -> Vec<String> {
        self.state
            .borrow()
            .assets
            .iter()
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn id_of(&self, name: &str) -> Option<AssetId> {
        self.state
            .borrow()
            .assets
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.id)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn upload_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Upload(_)))
            .count()
    }

    pub fn deletes(&self) -> Vec<AssetId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

impl ReleaseApi for FakeRelease {
    fn release_by_tag(&self, _: &RepoSlug, tag: &str) -> Result<ReleaseId, ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Tag(tag.to_string()));
        state
            .tags
            .get(tag)
            .map(|id| ReleaseId(*id))
            .ok_or_else(|| status(404, "Not Found"))
    }

    fn list_assets_page(
        &self,
        _: &ReleaseTarget,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AssetInfo>, ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::List(page));
        if let Some(err) = state.list_fault.clone() {
            return Err(err);
        }
        let visible: Vec<AssetInfo> = state
            .assets
            .iter()
            .filter(|a| !state.hidden.contains(&a.name))
            .filter(|a| state.hidden_for.get(&a.name).map_or(true, |left| *left == 0))
            .cloned()
            .collect();
        for left in state.hidden_for.values_mut() {
            *left = left.saturating_sub(1);
        }
        let start = ((page - 1) * per_page) as usize;
        let end = (start + per_page as usize).min(visible.len());
        let items = visible.get(start..end).map(<[_]>::to_vec).unwrap_or_default();
        Ok(Page {
            items,
            has_more: end < visible.len(),
        })
    }

    fn delete_asset(&self, _: &RepoSlug, asset_id: AssetId) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Delete(asset_id));
        if let Some(err) = state.delete_faults.get(&asset_id).cloned() {
            return Err(err);
        }
        let before = state.assets.len();
        state.assets.retain(|a| a.id != asset_id);
        if state.assets.len() == before {
            return Err(status(404, "Not Found"));
        }
        Ok(())
    }

    fn upload_asset(
        &self,
        _: &ReleaseTarget,
        request: &UploadRequest<'_>,
    ) -> Result<UploadedAsset, ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Upload(request.name.to_string()));
        assert_eq!(request.content_length, request.body.len() as u64);
        if let Some(Some(err)) = state.upload_script.pop_front() {
            return Err(err);
        }
        let stored = normalize_asset_name(request.name);
        if state.assets.iter().any(|a| a.name == stored) {
            return Err(conflict());
        }
        state.next_id += 1;
        let id = AssetId(state.next_id);
        state.assets.push(AssetInfo {
            id,
            name: stored.clone(),
        });
        Ok(UploadedAsset {
            id,
            name: stored.clone(),
            browser_download_url: format!("https://example.test/download/{stored}"),
        })
    }
}

pub fn target() -> ReleaseTarget {
    ReleaseTarget::new(
        RepoSlug {
            owner: "octo".into(),
            repo: "hello".into(),
        },
        ReleaseId(42),
    )
}

/// Write `name` with `contents` under `dir` and describe it for upload.
pub fn local_file(dir: &Path, name: &str, contents: &str) -> LocalFile {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write local file");
    describe_file(path).expect("describe local file")
}
