//! CI build matrices

use papermc_errors::Error;
use papermc_events::{AppEvent, EventEmitter, ResolverEvent};
use papermc_net::MetadataSource;
use papermc_types::QueryOptions;
use serde::Serialize;

use crate::selector;

/// One row of a CI matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub version: String,
    pub build: u32,
    pub url: String,
}

/// Matrix shaped for a GitHub Actions `strategy.matrix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubMatrix {
    pub include: Vec<MatrixEntry>,
}

impl From<Vec<MatrixEntry>> for GithubMatrix {
    fn from(include: Vec<MatrixEntry>) -> Self {
        Self { include }
    }
}

/// Latest build of each of the newest versions, oldest first
///
/// Versions are walked newest first. A version without a build on the
/// requested channel, or whose build has no canonical download URL, is
/// skipped and does not count towards `options.limit`.
///
/// # Errors
///
/// Returns `NotFound` if the project has no versions, or any lookup error
/// other than "not found".
pub async fn build_matrix(
    source: &dyn MetadataSource,
    project: &str,
    options: &QueryOptions,
    events: &impl EventEmitter,
) -> Result<Vec<MatrixEntry>, Error> {
    let versions = selector::project_versions(source, project).await?;
    let mut entries = Vec::new();

    for version in versions.iter().rev() {
        if options.limit.is_some_and(|limit| entries.len() >= limit) {
            break;
        }

        let build = match selector::latest_build(source, project, version, options.channel).await
        {
            Ok(build) => build,
            Err(err) if err.is_not_found() => {
                skipped(events, project, version, "no matching build");
                continue;
            }
            Err(err) => return Err(err),
        };

        let Some(url) = build.default_download_url() else {
            skipped(events, project, version, "no download URL");
            continue;
        };

        entries.push(MatrixEntry {
            version: version.clone(),
            build: build.id,
            url: url.to_string(),
        });
    }

    entries.reverse();
    Ok(entries)
}

fn skipped(events: &impl EventEmitter, project: &str, version: &str, reason: &str) {
    events.emit(AppEvent::Resolver(ResolverEvent::VersionSkipped {
        project: project.to_string(),
        version: version.to_string(),
        reason: reason.to_string(),
    }));
}
