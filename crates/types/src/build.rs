//! Builds, release channels and downloadable artifacts

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Artifact key the metadata service uses for the main server jar
pub const DEFAULT_ARTIFACT_KEY: &str = "server:default";

/// Stability channel a build is published on
///
/// Channels have no general ordering. The only priority between them is the
/// one the promoted-build policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Alpha,
    Beta,
    Stable,
    Recommended,
}

impl Channel {
    /// Spelling used on the wire (`STABLE`, ...)
    #[must_use]
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Beta => "BETA",
            Self::Stable => "STABLE",
            Self::Recommended => "RECOMMENDED",
        }
    }

    /// Lowercase spelling used in config files and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Stable => "stable",
            Self::Recommended => "recommended",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a channel name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown channel `{0}` (expected alpha, beta, stable or recommended)")]
pub struct ParseChannelError(pub String);

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "stable" => Ok(Self::Stable),
            "recommended" => Ok(Self::Recommended),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_api_str())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Implement clap::ValueEnum for Channel
impl clap::ValueEnum for Channel {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Alpha, Self::Beta, Self::Stable, Self::Recommended]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Expected digests published for an artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// A single downloadable file belonging to a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub checksums: Checksums,
}

impl Artifact {
    /// Published SHA-256, ignoring an empty string
    #[must_use]
    pub fn expected_sha256(&self) -> Option<&str> {
        self.checksums
            .sha256
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Artifacts of a build, in the order the metadata service listed them
///
/// The wire format is a JSON object keyed by artifact key. Keeping the
/// entries as a list makes "first artifact" mean "first listed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactList {
    entries: Vec<(String, Artifact)>,
}

impl ArtifactList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an artifact; a repeated key replaces the earlier entry in place
    pub fn insert(&mut self, key: impl Into<String>, artifact: Artifact) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = artifact;
        } else {
            self.entries.push((key, artifact));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Artifact> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, artifact)| artifact)
    }

    /// Look an artifact up by its file name rather than its key
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &Artifact)> {
        self.iter().find(|(_, artifact)| artifact.name == name)
    }

    #[must_use]
    pub fn first(&self) -> Option<(&str, &Artifact)> {
        self.entries
            .first()
            .map(|(key, artifact)| (key.as_str(), artifact))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Artifact)> {
        self.entries
            .iter()
            .map(|(key, artifact)| (key.as_str(), artifact))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Artifact)> for ArtifactList {
    fn from_iter<I: IntoIterator<Item = (K, Artifact)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (key, artifact) in iter {
            list.insert(key, artifact);
        }
        list
    }
}

impl Serialize for ArtifactList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, artifact) in &self.entries {
            map.serialize_entry(key, artifact)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ArtifactList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArtifactListVisitor;

        impl<'de> Visitor<'de> for ArtifactListVisitor {
            type Value = ArtifactList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of artifact key to artifact")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut list = ArtifactList::new();
                while let Some((key, artifact)) = access.next_entry::<String, Artifact>()? {
                    list.insert(key, artifact);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ArtifactListVisitor)
    }
}

/// A commit included in a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
}

/// A build of one project version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: u32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    pub channel: Channel,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub downloads: ArtifactList,
}

impl Build {
    /// URL of the canonical server artifact, if the build has one
    #[must_use]
    pub fn default_download_url(&self) -> Option<&str> {
        self.downloads
            .get(DEFAULT_ARTIFACT_KEY)
            .map(|artifact| artifact.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILD_JSON: &str = r#"{
        "id": 74,
        "time": "2025-01-12T10:30:00Z",
        "channel": "STABLE",
        "commits": [{"sha": "abc", "time": "2025-01-12T10:00:00Z", "message": "Fix"}],
        "downloads": {
            "server:mojmap": {"name": "paper-mojmap-1.21.11-74.jar", "url": "https://example.com/m.jar", "size": 10, "checksums": {"sha256": "bb"}},
            "server:default": {"name": "paper-1.21.11-74.jar", "url": "https://example.com/d.jar", "size": 54819307, "checksums": {"sha256": "aa"}},
            "zz:extra": {"name": "extra.jar", "url": "https://example.com/e.jar", "size": 1, "checksums": {}}
        }
    }"#;

    #[test]
    fn test_channel_parse_is_case_insensitive() {
        assert_eq!("STABLE".parse::<Channel>().unwrap(), Channel::Stable);
        assert_eq!("recommended".parse::<Channel>().unwrap(), Channel::Recommended);
        assert!("nightly".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_wire_format() {
        let json = serde_json::to_string(&Channel::Beta).unwrap();
        assert_eq!(json, "\"BETA\"");
        let parsed: Channel = serde_json::from_str("\"ALPHA\"").unwrap();
        assert_eq!(parsed, Channel::Alpha);
    }

    #[test]
    fn test_build_decodes_with_artifacts_in_document_order() {
        let build: Build = serde_json::from_str(BUILD_JSON).unwrap();
        assert_eq!(build.id, 74);
        assert_eq!(build.channel, Channel::Stable);
        assert_eq!(build.commits.len(), 1);

        let keys: Vec<&str> = build.downloads.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["server:mojmap", "server:default", "zz:extra"]);
        assert_eq!(build.downloads.first().unwrap().0, "server:mojmap");
        assert_eq!(
            build.default_download_url(),
            Some("https://example.com/d.jar")
        );
    }

    #[test]
    fn test_missing_or_blank_checksum_is_none() {
        let build: Build = serde_json::from_str(BUILD_JSON).unwrap();
        let extra = build.downloads.get("zz:extra").unwrap();
        assert_eq!(extra.expected_sha256(), None);

        let mut blank = extra.clone();
        blank.checksums.sha256 = Some("  ".to_string());
        assert_eq!(blank.expected_sha256(), None);
    }

    #[test]
    fn test_minimal_build_payload() {
        let build: Build = serde_json::from_str(r#"{"id": 3, "channel": "ALPHA"}"#).unwrap();
        assert!(build.downloads.is_empty());
        assert!(build.time.is_none());
        assert_eq!(build.default_download_url(), None);
    }

    #[test]
    fn test_artifact_list_serializes_as_map() {
        let list: ArtifactList = vec![(
            "server:default",
            Artifact {
                name: "a.jar".to_string(),
                url: "https://example.com/a.jar".to_string(),
                size: 1,
                checksums: Checksums::default(),
            },
        )]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["server:default"]["name"], "a.jar");
    }
}
