//! Error types for relsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or missing configuration. Always fatal, never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A named input could not be parsed.
    #[error("invalid `{name}` input")]
    Invalid { name: String },

    /// A numeric input parsed but fell outside its allowed range.
    #[error("input `{name}` is out of range")]
    OutOfRange { name: String },

    /// No API token was supplied.
    #[error("GITHUB_TOKEN environment variable not found. pass `GITHUB_TOKEN` as env or use --token")]
    MissingToken,

    /// No target repository was supplied and none is available from the environment.
    #[error("unable to determine the target repository; pass `--repo owner/repo`")]
    MissingRepo,

    /// Neither an id, a tag, nor a release event payload yielded a release.
    #[error("unable to determine the release id")]
    ReleaseNotDetermined,

    /// The event payload file could not be read.
    #[error("failed to read event payload at {path}: {source}")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event payload file is not valid JSON.
    #[error("failed to parse event payload at {path}: {source}")]
    EventParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The `files` input resolved to nothing.
    #[error("No files to process")]
    NoFiles,

    /// A literal entry of the `files` input does not name an existing file.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
}

impl ConfigError {
    pub(crate) fn invalid(name: &str) -> Self {
        Self::Invalid {
            name: name.to_owned(),
        }
    }
}
