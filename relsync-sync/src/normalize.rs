//! Emulation of the platform's asset filename sanitization.
//!
//! The server may store an asset under a different name than requested. To
//! find the asset an upload collided with, the local name is pushed through
//! the same rewriting rules:
//!
//! 1. canonical decomposition (NFD)
//! 2. combining diacritical marks (U+0300..=U+036F) removed
//! 3. everything outside `[A-Za-z0-9._-]` removed
//! 4. trailing dots removed
//! 5. leading dots replaced by a single `default.` prefix
//!
//! This mirrors observed server behavior and is not guaranteed to match it
//! in every case; a mismatch means the conflicting asset is not found and
//! the upload error surfaces.

use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalize a requested asset name the way the server would store it.
pub fn normalize_asset_name(name: &str) -> String {
    let kept: String = name
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let trimmed = kept.trim_end_matches('.');
    if trimmed.starts_with('.') {
        format!("default.{}", trimmed.trim_start_matches('.'))
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("café.txt", "cafe.txt")]
    #[case("...hidden", "default.hidden")]
    #[case(".env", "default.env")]
    #[case("a/b*c?.bin", "abc.bin")]
    #[case("trailing...", "trailing")]
    #[case("my file (1).tar.gz", "myfile1.tar.gz")]
    #[case("Ångström-ü_ß.dat", "Angstrom-u_.dat")]
    #[case("...", "")]
    #[case("", "")]
    #[case(".a.", "default.a")]
    #[case("plain-name_1.0.zip", "plain-name_1.0.zip")]
    fn documented_examples(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_asset_name(input), expected);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(input in "\\PC*") {
            let once = normalize_asset_name(&input);
            prop_assert_eq!(normalize_asset_name(&once), once.clone());
        }

        #[test]
        fn output_only_contains_allowed_characters(input in "\\PC*") {
            let out = normalize_asset_name(&input);
            prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')));
            prop_assert!(!out.ends_with('.'));
        }
    }
}
