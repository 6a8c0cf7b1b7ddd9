//! The payload of the workflow event that triggered the run.
//!
//! Only the fields needed to locate a release are modelled; everything else
//! in the document is ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::ReleaseId;

/// Event actions that carry a usable `release` object.
const RELEASE_ACTIONS: &[&str] = &["published", "created", "prereleased"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub release: Option<EventRelease>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRelease {
    pub id: u64,
}

impl EventPayload {
    /// Load a payload from the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::EventRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::EventParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The release id, when the event is a release publication/creation.
    pub fn release_id(&self) -> Option<ReleaseId> {
        let action = self.action.as_deref()?;
        if !RELEASE_ACTIONS.contains(&action) {
            return None;
        }
        self.release
            .as_ref()
            .filter(|r| r.id >= 1)
            .map(|r| ReleaseId(r.id))
    }
}
