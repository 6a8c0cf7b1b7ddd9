//! Options shared by every command: credentials, repository, release.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use relsync_core::{
    inputs::{parse_number, parse_release_id},
    ConfigError, EventPayload, ReleaseTarget, RepoSlug,
};
use relsync_github::{ClientConfig, GithubClient, DEFAULT_API_URL};
use relsync_sync::{resolve_release, ReleaseSelector};

/// How to reach the release being worked on.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// API token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target repository.
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Release id; takes precedence over --tag.
    #[arg(long, env = "RELSYNC_RELEASE_ID", value_name = "ID")]
    pub release_id: Option<String>,

    /// Tag of the release.
    #[arg(long, env = "RELSYNC_TAG")]
    pub tag: Option<String>,

    /// JSON payload of the triggering event; used when neither id nor tag is given.
    #[arg(long, env = "GITHUB_EVENT_PATH", value_name = "PATH")]
    pub event_path: Option<PathBuf>,

    /// REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Uploads base URL [default: derived from --api-url].
    #[arg(long, env = "RELSYNC_UPLOAD_URL")]
    pub upload_url: Option<String>,

    /// Per-request read/write timeout in seconds.
    #[arg(long, env = "RELSYNC_TIMEOUT", default_value = "60", value_name = "SECS")]
    pub timeout: String,
}

/// Inputs validated without touching the network.
pub struct Prepared {
    pub client: GithubClient,
    pub repo: RepoSlug,
    pub selector: ReleaseSelector,
}

impl TargetArgs {
    /// Validate credentials, repository and release selection; build the client.
    pub fn prepare(&self) -> Result<Prepared> {
        let token = non_empty(&self.token).ok_or(ConfigError::MissingToken)?;
        let repo = match non_empty(&self.repo) {
            Some(repo) => RepoSlug::parse("repo", repo)?,
            None => return Err(ConfigError::MissingRepo.into()),
        };
        let selector = self.selector()?;
        let timeout = parse_number("timeout", &self.timeout, Some(1), Some(3600))?;

        let mut config = ClientConfig::new(token);
        config.api_url = self.api_url.clone();
        config.upload_url = non_empty(&self.upload_url).map(str::to_owned);
        config.timeout = Duration::from_secs(timeout.unsigned_abs());
        let client = GithubClient::new(config)?;
        tracing::debug!("using API at {} (uploads at {})", client.api_url(), client.upload_url());

        Ok(Prepared {
            client,
            repo,
            selector,
        })
    }

    fn selector(&self) -> Result<ReleaseSelector, ConfigError> {
        let release_id = non_empty(&self.release_id)
            .map(parse_release_id)
            .transpose()?;
        let tag = non_empty(&self.tag).map(str::to_owned);
        // The event file is only consulted when nothing more explicit was given.
        let event = match (&release_id, &tag, &self.event_path) {
            (None, None, Some(path)) if !path.as_os_str().is_empty() => {
                Some(EventPayload::load(path)?)
            }
            _ => None,
        };
        Ok(ReleaseSelector {
            release_id,
            tag,
            event,
        })
    }
}

impl Prepared {
    /// Resolve the release; may call the API when selecting by tag.
    pub fn target(&self) -> Result<ReleaseTarget> {
        let release_id = resolve_release(&self.client, &self.repo, &self.selector)?;
        Ok(ReleaseTarget::new(self.repo.clone(), release_id))
    }
}

/// Workflow runners pass unset inputs as empty strings.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
