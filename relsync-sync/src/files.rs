//! Expansion of the `files` input into concrete local files.
//!
//! Entries containing `*` or `?` are globs, expanded relative to the base
//! directory (`*` does not cross `/`; use `**` for that). Everything else is
//! a literal path that must name an existing file.

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use relsync_core::{ConfigError, LocalFile};

use crate::error::{io_err, SyncError};

const DEFAULT_MIME: &str = "application/octet-stream";

/// Check if an entry is a glob rather than a literal path.
pub fn is_glob_pattern(entry: &str) -> bool {
    entry.contains('*') || entry.contains('?')
}

/// Resolve `entries` to local files, in entry order.
///
/// Glob matches are sorted within their entry. Fails with
/// [`ConfigError::NoFiles`] when nothing is left.
pub fn resolve_files<S: AsRef<str>>(
    entries: &[S],
    base_dir: &Path,
) -> Result<Vec<LocalFile>, SyncError> {
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.as_ref();
        if is_glob_pattern(entry) {
            let matched = expand_glob(entry, base_dir)?;
            if matched.is_empty() {
                tracing::warn!("pattern `{entry}` matched no files");
            }
            paths.extend(matched);
        } else {
            let path = base_dir.join(entry);
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path }.into());
            }
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(ConfigError::NoFiles.into());
    }
    paths.into_iter().map(describe_file).collect()
}

/// Stat `path` and guess its mime type from the extension.
pub fn describe_file(path: PathBuf) -> Result<LocalFile, SyncError> {
    let size = std::fs::metadata(&path)
        .map_err(|e| io_err(&path, e))?
        .len();
    let mime = mime_guess::from_path(&path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME);
    Ok(LocalFile::new(path, size, mime))
}

fn expand_glob(pattern: &str, base_dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| SyncError::Glob {
            pattern: pattern.to_owned(),
            source,
        })?
        .compile_matcher();

    let absolute = Path::new(pattern).is_absolute();
    let root = base_dir.join(literal_prefix(Path::new(pattern)));
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found: Vec<PathBuf> = WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let path = e.path();
            if absolute {
                matcher.is_match(path)
            } else {
                path.strip_prefix(base_dir)
                    .map(|rel| matcher.is_match(rel))
                    .unwrap_or(false)
            }
        })
        .map(|e| e.into_path())
        .collect();
    found.sort();
    Ok(found)
}

/// Leading components of `pattern` free of wildcards; the directory to walk.
fn literal_prefix(pattern: &Path) -> PathBuf {
    let components: Vec<Component<'_>> = pattern.components().collect();
    let literal = components
        .iter()
        .position(|c| is_glob_pattern(&c.as_os_str().to_string_lossy()))
        .unwrap_or(components.len());
    components[..literal].iter().collect()
}
