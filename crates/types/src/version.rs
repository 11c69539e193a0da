//! Release version identifiers and their ordering
//!
//! Identifiers published by the metadata service are not semver. They look
//! like `1.21.11`, `1.21.11-rc3` or `1.21.4-pre1`, and a plain lexicographic
//! sort puts `1.7.10` after `1.21.11`. Ordering here is:
//!
//! 1. numeric on the dot-separated prefix (shorter prefixes zero-padded)
//! 2. for equal prefixes, a suffixed identifier sorts before the bare one
//!    (`1.21.11-rc3` < `1.21.11`), and two suffixes compare as plain strings
//! 3. identifiers still equal after that fall back to the raw string, which
//!    keeps the order total

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Markers that flag an identifier as a prerelease (matched lowercase)
const PRERELEASE_MARKERS: &[&str] = &["snapshot", "-pre", "-rc"];

/// A version identifier with its comparable parts pre-split
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReleaseVersion {
    raw: String,
    numeric: Vec<u64>,
    suffix: Option<String>,
}

impl ReleaseVersion {
    /// Split an identifier into its numeric prefix and optional suffix
    ///
    /// Parsing never fails: a dot component without leading digits counts as
    /// zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (prefix, suffix) = match raw.split_once('-') {
            Some((prefix, suffix)) => (prefix, Some(suffix.to_string())),
            None => (raw, None),
        };

        Self {
            raw: raw.to_string(),
            numeric: prefix.split('.').map(leading_number).collect(),
            suffix,
        }
    }

    /// The identifier exactly as published
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Dot-separated numeric prefix
    #[must_use]
    pub fn numeric(&self) -> &[u64] {
        &self.numeric
    }

    /// Text after the first hyphen, if any
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Whether this identifier is a snapshot, pre-release or release candidate
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        is_prerelease(&self.raw)
    }

    fn cmp_numeric(&self, other: &Self) -> Ordering {
        let len = self.numeric.len().max(other.numeric.len());
        for i in 0..len {
            let a = self.numeric.get(i).copied().unwrap_or(0);
            let b = other.numeric.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    fn cmp_suffix(&self, other: &Self) -> Ordering {
        match (&self.suffix, &other.suffix) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_numeric(other)
            .then_with(|| self.cmp_suffix(other))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for ReleaseVersion {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for ReleaseVersion {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<ReleaseVersion> for String {
    fn from(version: ReleaseVersion) -> Self {
        version.raw
    }
}

/// Compare two raw identifiers with release ordering
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    ReleaseVersion::parse(a).cmp(&ReleaseVersion::parse(b))
}

/// Whether an identifier names a snapshot, pre-release or release candidate
///
/// Matches `snapshot` anywhere, or a `-pre` / `-rc` segment, ignoring case.
#[must_use]
pub fn is_prerelease(id: &str) -> bool {
    let lower = id.to_ascii_lowercase();
    PRERELEASE_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

fn leading_number(component: &str) -> u64 {
    let digits: &str = component
        .find(|c: char| !c.is_ascii_digit())
        .map_or(component, |end| &component[..end]);

    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}
