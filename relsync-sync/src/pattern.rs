//! Wildcard masks selecting assets for deletion.
//!
//! `*` matches any run of characters, `?` exactly one. Matching is
//! case-insensitive and covers the whole name; every other character,
//! including `.`, is literal.

use regex::{Regex, RegexBuilder};

use crate::error::SyncError;

/// A single compiled mask.
#[derive(Debug, Clone)]
pub struct DeletePattern {
    source: String,
    regex: Regex,
}

impl DeletePattern {
    pub fn new(pattern: &str) -> Result<Self, SyncError> {
        let regex = RegexBuilder::new(&wildcard_to_regex(pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| SyncError::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

/// The fixed set of masks for a run.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<DeletePattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(masks: &[S]) -> Result<Self, SyncError> {
        let patterns = masks
            .iter()
            .map(|m| DeletePattern::new(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first mask matching `name`, if any.
    pub fn find_match(&self, name: &str) -> Option<&DeletePattern> {
        self.patterns.iter().find(|p| p.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        DeletePattern::new(pattern).unwrap().matches(name)
    }

    #[rstest]
    #[case("*.zip", "a.zip", true)]
    #[case("*.zip", "a.zip.bak", false)]
    #[case("*.zip", "A.ZIP", true)]
    #[case("*.zip", "azip", false)]
    #[case("app-?.tar.gz", "app-1.tar.gz", true)]
    #[case("app-?.tar.gz", "app-12.tar.gz", false)]
    #[case("app-?.tar.gz", "app-.tar.gz", false)]
    #[case("*-linux-*", "tool-linux-x64", true)]
    #[case("*", "", true)]
    #[case("", "", true)]
    #[case("", "a", false)]
    #[case("a+b(1).txt", "a+b(1).txt", true)]
    #[case("a+b(1).txt", "aab1.txt", false)]
    #[case("CAFÉ*", "café.txt", true)]
    fn wildcard_semantics(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, name), expected, "{pattern} vs {name}");
    }

    #[test]
    fn every_wildcard_occurrence_is_translated() {
        assert!(matches("*-*-*.bin", "a-b-c.bin"));
        assert!(matches("??.??", "ab.cd"));
    }

    #[test]
    fn set_reports_first_matching_mask() {
        let set = PatternSet::compile(&["*.txt", "*.zip", "old.*"]).unwrap();
        assert_eq!(set.find_match("old.zip").map(DeletePattern::as_str), Some("*.zip"));
        assert!(set.find_match("keep.md").is_none());
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = PatternSet::compile::<&str>(&[]).unwrap();
        assert!(set.is_empty());
        assert!(set.find_match("anything").is_none());
    }
}
