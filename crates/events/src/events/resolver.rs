use serde::{Deserialize, Serialize};

/// Decisions taken while resolving versions, builds and artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    VersionSelected {
        project: String,
        version: String,
        policy: String,
    },

    /// A promotion strategy found nothing and the next one is tried
    StrategySkipped {
        project: String,
        version: String,
        strategy: String,
    },

    BuildSelected {
        project: String,
        version: String,
        build: u32,
        strategy: String,
    },

    ArtifactSelected {
        build: u32,
        key: String,
        name: String,
    },

    /// A version was left out of a CI matrix
    VersionSkipped {
        project: String,
        version: String,
        reason: String,
    },
}
