//! Parsing and validation of user-supplied configuration values.
//!
//! Every function takes the input's public `name` so the resulting
//! [`ConfigError`] tells the user which input was wrong.

use crate::error::ConfigError;
use crate::types::ReleaseId;

/// Parse a yes/no style input, case-insensitively.
///
/// Accepts `true`, `yes`, `y`, `1` and `false`, `no`, `n`, `0`.
pub fn parse_bool(name: &str, input: &str) -> Result<bool, ConfigError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(ConfigError::invalid(name)),
    }
}

/// Parse a base-10 integer and check it against optional inclusive bounds.
pub fn parse_number(
    name: &str,
    input: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<i64, ConfigError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(name))?;
    if min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max) {
        return Err(ConfigError::OutOfRange {
            name: name.to_owned(),
        });
    }
    Ok(value)
}

/// Parse a release id. Anything that is not a positive integer is invalid.
pub fn parse_release_id(input: &str) -> Result<ReleaseId, ConfigError> {
    match input.trim().parse::<u64>() {
        Ok(id) if id >= 1 => Ok(ReleaseId(id)),
        _ => Err(ConfigError::invalid("release_id")),
    }
}

/// Flatten multi-valued inputs.
///
/// Each value may itself hold several newline-separated entries. Entries are
/// trimmed and blank ones dropped; order is preserved.
pub fn split_multiline<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
