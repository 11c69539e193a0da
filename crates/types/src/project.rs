//! Projects, version groups and per-version metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Group key (e.g. `1.21`) to the version identifiers in that group
///
/// Neither the group order nor the order inside a group is meaningful.
pub type VersionGroups = HashMap<String, Vec<String>>;

/// Project identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A project together with its version groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    #[serde(default)]
    pub versions: VersionGroups,
}

impl ProjectDetail {
    /// Total number of version identifiers across all groups
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.versions.values().map(Vec::len).sum()
    }
}

/// Response of the project listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<ProjectDetail>,
}

/// Support window of a version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Identity and support status of a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub id: String,
    #[serde(default)]
    pub support: SupportInfo,
}

/// Response of the single-version endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDetail {
    pub version: VersionInfo,
    #[serde(default)]
    pub builds: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_detail_decodes_version_groups() {
        let json = r#"{
            "project": {"id": "paper", "name": "Paper"},
            "versions": {
                "1.21": ["1.21.11", "1.21.11-rc3", "1.21.10"],
                "1.20": ["1.20.6", "1.20.5"]
            }
        }"#;

        let detail: ProjectDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.project.id, "paper");
        assert_eq!(detail.project.name, "Paper");
        assert_eq!(detail.versions.len(), 2);
        assert_eq!(detail.version_count(), 5);
    }

    #[test]
    fn test_version_detail_decodes() {
        let json = r#"{
            "version": {"id": "1.21.11-rc3", "support": {"status": "UNSUPPORTED"}},
            "builds": [31, 30]
        }"#;

        let detail: VersionDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.version.id, "1.21.11-rc3");
        assert_eq!(detail.version.support.status, "UNSUPPORTED");
        assert_eq!(detail.builds, vec![31, 30]);
    }
}
