//! Domain types shared by the reconciliation engine and its collaborators.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Server-assigned release identifier. Always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseId(pub u64);

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ReleaseId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Server-assigned asset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo`. Both halves are trimmed and must be non-empty.
    ///
    /// `name` is the input name reported in the error.
    pub fn parse(name: &str, input: &str) -> Result<Self, ConfigError> {
        let items: Vec<&str> = input.split('/').collect();
        let [owner, repo] = items.as_slice() else {
            return Err(ConfigError::invalid(name));
        };
        let (owner, repo) = (owner.trim(), repo.trim());
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::invalid(name));
        }
        Ok(Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// The release being reconciled. Read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTarget {
    pub repo: RepoSlug,
    pub release_id: ReleaseId,
}

impl ReleaseTarget {
    pub fn new(repo: RepoSlug, release_id: ReleaseId) -> Self {
        Self { repo, release_id }
    }
}

impl fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} release {}", self.repo, self.release_id)
    }
}

/// A local file scheduled for upload.
///
/// Content is not held in memory; it is read from `path` on every upload
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    /// Basename of `path`; the name requested from the server.
    pub asset_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl LocalFile {
    /// Build a `LocalFile` from a path, a known size and a mime type.
    ///
    /// The asset name is the final path component, lossily converted to UTF-8.
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let asset_name = asset_name_of(&path);
        Self {
            path,
            asset_name,
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

fn asset_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final per-file result, serialized as `{"id": …, "url": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub id: AssetId,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(ReleaseId::from(42).to_string(), "42");
        assert_eq!(AssetId(7).to_string(), "7");
    }

    #[test]
    fn repo_slug_trims_both_halves() {
        let slug = RepoSlug::parse("repo", " octo / hello ").unwrap();
        assert_eq!(slug.owner, "octo");
        assert_eq!(slug.repo, "hello");
        assert_eq!(slug.to_string(), "octo/hello");
    }

    #[test]
    fn repo_slug_rejects_wrong_shapes() {
        for bad in ["", "octo", "a/b/c", "/hello", "octo/ ", " / "] {
            let err = RepoSlug::parse("repo", bad).unwrap_err();
            assert_eq!(err.to_string(), "invalid `repo` input", "input {bad:?}");
        }
    }

    #[test]
    fn local_file_derives_basename() {
        let file = LocalFile::new("dist/bin/app-v1.tar.gz", 10, "application/gzip");
        assert_eq!(file.asset_name, "app-v1.tar.gz");
    }

    #[test]
    fn outcome_serializes_as_id_and_url() {
        let outcome = UploadOutcome {
            id: AssetId(5),
            url: "https://example.test/a.txt".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"id":5,"url":"https://example.test/a.txt"}"#);
    }
}
