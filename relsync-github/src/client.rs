//! GitHub release-asset client over `ureq`.
//!
//! Every request carries the bearer token, the v3 JSON media type and a
//! pinned API version. Non-success answers become [`ApiError::Status`] with
//! the server's `message` field when it sent one.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use relsync_core::{
    ApiError, AssetId, AssetInfo, Page, ReleaseApi, ReleaseId, ReleaseTarget, RepoSlug,
    UploadRequest, UploadedAsset,
};

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";
const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

/// Unreserved URL characters stay readable in path segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for [`GithubClient::new`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token: String,
    pub api_url: String,
    /// Uploads base URL; derived from `api_url` when `None`.
    pub upload_url: Option<String>,
    /// Read/write timeout for every request.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Honour `HTTPS_PROXY`/`HTTP_PROXY`/`ALL_PROXY`.
    pub proxy_from_env: bool,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            upload_url: None,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(30),
            proxy_from_env: true,
            user_agent: concat!("relsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Uploads base URL matching an API base URL.
///
/// `api.github.com` pairs with `uploads.github.com`; an Enterprise
/// `https://host/api/v3` pairs with `https://host/api/uploads`. Anything else
/// is assumed to serve uploads itself.
pub fn derive_upload_url(api_url: &str) -> String {
    let api_url = api_url.trim_end_matches('/');
    if api_url == DEFAULT_API_URL {
        return DEFAULT_UPLOAD_URL.to_string();
    }
    match api_url.strip_suffix("/api/v3") {
        Some(host) => format!("{host}/api/uploads"),
        None => api_url.to_string(),
    }
}

fn check_url(url: &str) -> Result<String, ClientError> {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url.to_string())
    } else {
        Err(ClientError::InvalidUrl(url.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking GitHub client. One request in flight at a time.
pub struct GithubClient {
    agent: ureq::Agent,
    api_url: String,
    upload_url: String,
    authorization: String,
}

#[derive(Deserialize)]
struct ReleaseInfo {
    id: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.token.trim().is_empty() {
            return Err(ClientError::EmptyToken);
        }
        let api_url = check_url(&config.api_url)?;
        let upload_url = match config.upload_url.as_deref() {
            Some(url) => check_url(url)?,
            None => derive_upload_url(&api_url),
        };

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.timeout)
            .timeout_write(config.timeout)
            .user_agent(&config.user_agent)
            .try_proxy_from_env(config.proxy_from_env)
            .build();

        Ok(Self {
            agent,
            api_url,
            upload_url,
            authorization: format!("Bearer {}", config.token.trim()),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.authorization)
            .set("Accept", ACCEPT)
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    fn repo_url(&self, base: &str, repo: &RepoSlug) -> String {
        format!(
            "{base}/repos/{}/{}",
            encode_segment(&repo.owner),
            encode_segment(&repo.repo)
        )
    }
}

impl ReleaseApi for GithubClient {
    fn release_by_tag(&self, repo: &RepoSlug, tag: &str) -> Result<ReleaseId, ApiError> {
        let url = format!(
            "{}/releases/tags/{}",
            self.repo_url(&self.api_url, repo),
            encode_segment(tag)
        );
        tracing::debug!("GET {url}");
        let response = self.request("GET", &url).call().map_err(api_error)?;
        let release: ReleaseInfo = response.into_json().map_err(body_error)?;
        Ok(ReleaseId(release.id))
    }

    fn list_assets_page(
        &self,
        target: &ReleaseTarget,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AssetInfo>, ApiError> {
        let url = format!(
            "{}/releases/{}/assets",
            self.repo_url(&self.api_url, &target.repo),
            target.release_id
        );
        tracing::debug!("GET {url} page={page} per_page={per_page}");
        let response = self
            .request("GET", &url)
            .query("per_page", &per_page.to_string())
            .query("page", &page.to_string())
            .call()
            .map_err(api_error)?;

        let link_says_more = response.header("link").map(has_next_page);
        let items: Vec<AssetInfo> = response.into_json().map_err(body_error)?;
        let has_more =
            link_says_more.unwrap_or(!items.is_empty() && items.len() as u32 >= per_page);
        Ok(Page { items, has_more })
    }

    fn delete_asset(&self, repo: &RepoSlug, asset_id: AssetId) -> Result<(), ApiError> {
        let url = format!(
            "{}/releases/assets/{asset_id}",
            self.repo_url(&self.api_url, repo)
        );
        tracing::debug!("DELETE {url}");
        self.request("DELETE", &url).call().map_err(api_error)?;
        Ok(())
    }

    fn upload_asset(
        &self,
        target: &ReleaseTarget,
        request: &UploadRequest<'_>,
    ) -> Result<UploadedAsset, ApiError> {
        let url = format!(
            "{}/releases/{}/assets",
            self.repo_url(&self.upload_url, &target.repo),
            target.release_id
        );
        tracing::debug!("POST {url} name={} bytes={}", request.name, request.content_length);
        let response = self
            .request("POST", &url)
            .query("name", request.name)
            .set("Content-Type", request.content_type)
            .set("Content-Length", &request.content_length.to_string())
            .send_bytes(request.body)
            .map_err(api_error)?;
        response.into_json().map_err(body_error)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Whether a `Link` header advertises a `rel="next"` page.
pub(crate) fn has_next_page(link: &str) -> bool {
    link.split(',').any(|part| {
        part.split(';')
            .skip(1)
            .any(|param| matches!(param.trim(), r#"rel="next""# | "rel=next"))
    })
}

/// Human-readable message for an error response body.
///
/// Prefers the JSON `message` field, then the raw body, then `fallback`.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return message;
    }
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

fn api_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let fallback = response.status_text().to_string();
            let body = response.into_string().unwrap_or_default();
            ApiError::Status {
                status,
                message: error_message(&body, &fallback),
            }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

fn body_error(err: std::io::Error) -> ApiError {
    ApiError::Transport(format!("failed to read response body: {err}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
