//! Latest, recommended and promoted release selection

use papermc_errors::{Error, NotFoundError};
use papermc_events::{AppEvent, EventEmitter, ResolverEvent};
use papermc_net::MetadataSource;
use papermc_types::{is_prerelease, Build, Channel};
use std::fmt;

use crate::catalog;

/// Newest identifier of an already flattened (oldest first) list
///
/// # Errors
///
/// Returns `NotFound` if the list is empty.
pub fn select_latest<'a>(project: &str, flattened: &'a [String]) -> Result<&'a str, Error> {
    flattened
        .last()
        .map(String::as_str)
        .ok_or_else(|| no_versions(project))
}

/// Newest identifier that is not a prerelease
///
/// Falls back to the newest identifier when every entry is a prerelease.
///
/// # Errors
///
/// Returns `NotFound` if the list is empty.
pub fn select_recommended<'a>(project: &str, flattened: &'a [String]) -> Result<&'a str, Error> {
    flattened
        .iter()
        .rev()
        .find(|id| !is_prerelease(id))
        .map(String::as_str)
        .map_or_else(|| select_latest(project, flattened), Ok)
}

/// Fetch a project's versions and order them, oldest first
///
/// # Errors
///
/// Returns `NotFound` if the project publishes no versions, or the source's
/// error if the lookup fails.
pub async fn project_versions(
    source: &dyn MetadataSource,
    project: &str,
) -> Result<Vec<String>, Error> {
    let detail = source.project(project).await?;
    match catalog::flatten(&detail.versions) {
        Err(Error::EmptyInput) => Err(no_versions(project)),
        other => other,
    }
}

/// Newest version of a project
///
/// # Errors
///
/// See [`project_versions`].
pub async fn latest_version(
    source: &dyn MetadataSource,
    project: &str,
    events: &impl EventEmitter,
) -> Result<String, Error> {
    let versions = project_versions(source, project).await?;
    let version = select_latest(project, &versions)?.to_string();
    emit_version(events, project, &version, "latest");
    Ok(version)
}

/// Newest non-prerelease version of a project
///
/// # Errors
///
/// See [`project_versions`].
pub async fn recommended_version(
    source: &dyn MetadataSource,
    project: &str,
    events: &impl EventEmitter,
) -> Result<String, Error> {
    let versions = project_versions(source, project).await?;
    let version = select_recommended(project, &versions)?.to_string();
    emit_version(events, project, &version, "recommended");
    Ok(version)
}

fn emit_version(events: &impl EventEmitter, project: &str, version: &str, policy: &str) {
    events.emit(AppEvent::Resolver(ResolverEvent::VersionSelected {
        project: project.to_string(),
        version: version.to_string(),
        policy: policy.to_string(),
    }));
}

/// One way of picking "the" build of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStrategy {
    /// Highest build id published on this channel
    ByChannel(Channel),
    /// Whatever the service reports as its latest build
    LatestShortcut,
}

impl PromotionStrategy {
    /// Recommended builds first, then stable, then the service's latest
    #[must_use]
    pub fn default_order() -> Vec<Self> {
        vec![
            Self::ByChannel(Channel::Recommended),
            Self::ByChannel(Channel::Stable),
            Self::LatestShortcut,
        ]
    }

    /// Run this strategy; `Ok(None)` means it found nothing
    ///
    /// # Errors
    ///
    /// Returns the source's error for anything other than "not found".
    pub async fn attempt(
        self,
        source: &dyn MetadataSource,
        project: &str,
        version: &str,
    ) -> Result<Option<u32>, Error> {
        let found = match self {
            Self::ByChannel(channel) => source
                .builds(project, version, &[channel])
                .await
                .map(|builds| max_build(&builds, Some(channel))),
            Self::LatestShortcut => source
                .latest_build(project, version)
                .await
                .map(|build| Some(build.id)),
        };

        match found {
            Ok(found) => Ok(found),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl fmt::Display for PromotionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByChannel(channel) => write!(f, "channel:{channel}"),
            Self::LatestShortcut => f.write_str("latest"),
        }
    }
}

/// Pick the build to ship for a version using the default strategy order
///
/// A strategy that finds nothing hands over to the next one. A hard failure
/// (anything other than "not found") stops the chain and is returned as is.
///
/// # Errors
///
/// Returns `NotFound::NoBuilds` when every strategy comes up empty, or the
/// first hard failure any strategy hits.
pub async fn find_promoted_build(
    source: &dyn MetadataSource,
    project: &str,
    version: &str,
    events: &impl EventEmitter,
) -> Result<u32, Error> {
    find_promoted_build_with(
        source,
        project,
        version,
        &PromotionStrategy::default_order(),
        events,
    )
    .await
}

/// Like [`find_promoted_build`] with an explicit strategy order
///
/// # Errors
///
/// See [`find_promoted_build`].
pub async fn find_promoted_build_with(
    source: &dyn MetadataSource,
    project: &str,
    version: &str,
    strategies: &[PromotionStrategy],
    events: &impl EventEmitter,
) -> Result<u32, Error> {
    for strategy in strategies {
        if let Some(build) = strategy.attempt(source, project, version).await? {
            events.emit(AppEvent::Resolver(ResolverEvent::BuildSelected {
                project: project.to_string(),
                version: version.to_string(),
                build,
                strategy: strategy.to_string(),
            }));
            return Ok(build);
        }
        events.emit(AppEvent::Resolver(ResolverEvent::StrategySkipped {
            project: project.to_string(),
            version: version.to_string(),
            strategy: strategy.to_string(),
        }));
    }

    Err(no_builds(project, version))
}

/// Newest build of a version, optionally restricted to one channel
///
/// The latest-build endpoint cannot filter, so with a channel the builds
/// of that channel are listed and the highest id wins.
///
/// # Errors
///
/// Returns `NotFound::NoBuilds` if the channel has no builds, or the
/// source's error.
pub async fn latest_build(
    source: &dyn MetadataSource,
    project: &str,
    version: &str,
    channel: Option<Channel>,
) -> Result<Build, Error> {
    let Some(channel) = channel else {
        return source.latest_build(project, version).await;
    };

    source
        .builds(project, version, &[channel])
        .await?
        .into_iter()
        .filter(|build| build.channel == channel)
        .max_by_key(|build| build.id)
        .ok_or_else(|| no_builds(project, version))
}

fn max_build(builds: &[Build], channel: Option<Channel>) -> Option<u32> {
    builds
        .iter()
        .filter(|build| channel.is_none_or(|channel| build.channel == channel))
        .map(|build| build.id)
        .max()
}

fn no_versions(project: &str) -> Error {
    NotFoundError::NoVersions {
        project: project.to_string(),
    }
    .into()
}

fn no_builds(project: &str, version: &str) -> Error {
    NotFoundError::NoBuilds {
        project: project.to_string(),
        version: version.to_string(),
    }
    .into()
}
