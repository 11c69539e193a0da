//! Choosing the artifact to download for a build

use papermc_errors::{Error, NotFoundError};
use papermc_events::{AppEvent, EventEmitter, ResolverEvent};
use papermc_net::MetadataSource;
use papermc_types::{Artifact, Build, QueryOptions, DEFAULT_ARTIFACT_KEY};
use serde::Serialize;

use crate::selector;

/// The canonical server artifact, or else the first one listed
///
/// # Errors
///
/// Returns `NotFound::NoArtifacts` if the build lists no artifacts.
pub fn default_artifact(build: &Build) -> Result<(&str, &Artifact), Error> {
    if let Some(artifact) = build.downloads.get(DEFAULT_ARTIFACT_KEY) {
        return Ok((DEFAULT_ARTIFACT_KEY, artifact));
    }

    build
        .downloads
        .first()
        .ok_or_else(|| NotFoundError::NoArtifacts { build: build.id }.into())
}

/// A fully identified artifact ready to download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub project: String,
    pub version: String,
    pub build: u32,
    pub key: String,
    pub artifact: Artifact,
}

impl ResolvedArtifact {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.artifact.url
    }

    /// File name to save under, falling back to the artifact key
    #[must_use]
    pub fn file_name(&self) -> &str {
        if self.artifact.name.is_empty() {
            &self.key
        } else {
            &self.artifact.name
        }
    }
}

/// Fetch a build and pick its default artifact
///
/// # Errors
///
/// Returns the source's error, or `NotFound::NoArtifacts`.
pub async fn resolve_artifact(
    source: &dyn MetadataSource,
    project: &str,
    version: &str,
    build_id: u32,
    events: &impl EventEmitter,
) -> Result<ResolvedArtifact, Error> {
    let build = source.build(project, version, build_id).await?;
    resolved_from_build(project, version, &build, events)
}

/// Pick a named artifact from a build instead of the default one
///
/// # Errors
///
/// Returns `NotFound::UnknownArtifact` if no artifact has that key or name.
pub fn named_artifact<'a>(build: &'a Build, name: &str) -> Result<(&'a str, &'a Artifact), Error> {
    build
        .downloads
        .iter()
        .find(|(key, _)| *key == name)
        .or_else(|| build.downloads.find_by_name(name))
        .ok_or_else(|| {
            NotFoundError::UnknownArtifact {
                name: name.to_string(),
                build: build.id,
            }
            .into()
        })
}

/// Answer "what should I download" for a project
///
/// Without a version the recommended version is used. Without a build the
/// promoted build is used, unless a channel filter is set, in which case the
/// newest build on that channel is.
///
/// # Errors
///
/// Returns `NotFound` when no version, build or artifact qualifies, or the
/// source's error.
pub async fn resolve_target(
    source: &dyn MetadataSource,
    project: &str,
    version: Option<&str>,
    build: Option<u32>,
    options: &QueryOptions,
    events: &impl EventEmitter,
) -> Result<ResolvedArtifact, Error> {
    let version = match version {
        Some(version) => version.to_string(),
        None => selector::recommended_version(source, project, events).await?,
    };

    let build = match (build, options.channel) {
        (Some(id), _) => source.build(project, &version, id).await?,
        (None, Some(channel)) => {
            selector::latest_build(source, project, &version, Some(channel)).await?
        }
        (None, None) => {
            let id = selector::find_promoted_build(source, project, &version, events).await?;
            source.build(project, &version, id).await?
        }
    };

    resolved_from_build(project, &version, &build, events)
}

fn resolved_from_build(
    project: &str,
    version: &str,
    build: &Build,
    events: &impl EventEmitter,
) -> Result<ResolvedArtifact, Error> {
    let (key, artifact) = default_artifact(build)?;
    events.emit(AppEvent::Resolver(ResolverEvent::ArtifactSelected {
        build: build.id,
        key: key.to_string(),
        name: artifact.name.clone(),
    }));

    Ok(ResolvedArtifact {
        project: project.to_string(),
        version: version.to_string(),
        build: build.id,
        key: key.to_string(),
        artifact: artifact.clone(),
    })
}
