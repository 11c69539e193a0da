//! Empty version, build and artifact sets

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum NotFoundError {
    #[error("no versions found for project {project}")]
    NoVersions { project: String },

    #[error("no builds found for {project} {version}")]
    NoBuilds { project: String, version: String },

    #[error("build {build} has no downloadable artifacts")]
    NoArtifacts { build: u32 },

    #[error("artifact {name} not found in build {build}")]
    UnknownArtifact { name: String, build: u32 },
}

impl UserFacingError for NotFoundError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoVersions { .. } => Some("Run `papermc list projects` to see valid project ids."),
            Self::NoBuilds { .. } => {
                Some("Run `papermc list versions <project>` and pick a version with builds.")
            }
            Self::NoArtifacts { .. } | Self::UnknownArtifact { .. } => {
                Some("Pick a different build with `papermc list builds <project> <version>`.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NoVersions { .. } => "not_found.versions",
            Self::NoBuilds { .. } => "not_found.builds",
            Self::NoArtifacts { .. } => "not_found.artifacts",
            Self::UnknownArtifact { .. } => "not_found.artifact",
        };
        Some(code)
    }
}
