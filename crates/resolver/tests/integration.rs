//! Resolver behaviour against an in-memory metadata source

use async_trait::async_trait;
use papermc_errors::{Error, NetworkError, NotFoundError};
use papermc_events::{channel, AppEvent, ResolverEvent};
use papermc_net::MetadataSource;
use papermc_resolver::*;
use papermc_types::{
    Artifact, ArtifactList, Build, Channel, Checksums, Project, ProjectDetail, QueryOptions, SupportInfo,
    VersionDetail, VersionGroups, VersionInfo, DEFAULT_ARTIFACT_KEY,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeSource {
    groups: HashMap<String, VersionGroups>,
    builds: HashMap<(String, String), Vec<Build>>,
    /// Channel whose listing fails with a transport error
    broken_channel: Option<Channel>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_project(mut self, project: &str, groups: &[(&str, &[&str])]) -> Self {
        let groups = groups
            .iter()
            .map(|(key, ids)| {
                (
                    (*key).to_string(),
                    ids.iter().map(|id| (*id).to_string()).collect(),
                )
            })
            .collect();
        self.groups.insert(project.to_string(), groups);
        self
    }

    fn with_builds(mut self, project: &str, version: &str, builds: Vec<Build>) -> Self {
        self.builds
            .insert((project.to_string(), version.to_string()), builds);
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn all_builds(&self, project: &str, version: &str) -> Vec<Build> {
        self.builds
            .get(&(project.to_string(), version.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

fn not_found(url: &str) -> Error {
    NetworkError::HttpError {
        status: 404,
        url: url.to_string(),
        body: String::new(),
    }
    .into()
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, Error> {
        let mut ids: Vec<_> = self.groups.keys().cloned().collect();
        ids.sort();
        let mut out = Vec::new();
        for id in ids {
            out.push(self.project(&id).await?);
        }
        Ok(out)
    }

    async fn project(&self, project: &str) -> Result<ProjectDetail, Error> {
        self.record(format!("project {project}"));
        let versions = self
            .groups
            .get(project)
            .cloned()
            .ok_or_else(|| not_found(project))?;
        Ok(ProjectDetail {
            project: Project {
                id: project.to_string(),
                name: project.to_string(),
            },
            versions,
        })
    }

    async fn version(&self, project: &str, version: &str) -> Result<VersionDetail, Error> {
        let mut builds: Vec<u32> = self.all_builds(project, version).iter().map(|b| b.id).collect();
        builds.sort_unstable();
        Ok(VersionDetail {
            version: VersionInfo {
                id: version.to_string(),
                support: SupportInfo::default(),
            },
            builds,
        })
    }

    async fn builds(
        &self,
        project: &str,
        version: &str,
        channels: &[Channel],
    ) -> Result<Vec<Build>, Error> {
        self.record(format!("builds {version} {channels:?}"));
        if let Some(broken) = self.broken_channel {
            if channels.contains(&broken) {
                return Err(NetworkError::Connection("connection reset".to_string()).into());
            }
        }
        Ok(self
            .all_builds(project, version)
            .into_iter()
            .filter(|b| channels.is_empty() || channels.contains(&b.channel))
            .collect())
    }

    async fn latest_build(&self, project: &str, version: &str) -> Result<Build, Error> {
        self.record(format!("latest {version}"));
        self.all_builds(project, version)
            .into_iter()
            .max_by_key(|b| b.id)
            .ok_or_else(|| not_found("builds/latest"))
    }

    async fn build(&self, project: &str, version: &str, id: u32) -> Result<Build, Error> {
        self.all_builds(project, version)
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("builds/id"))
    }
}

fn build(id: u32, channel: Channel) -> Build {
    let mut downloads = ArtifactList::new();
    downloads.insert(
        DEFAULT_ARTIFACT_KEY,
        Artifact {
            name: format!("paper-{id}.jar"),
            url: format!("https://fill-data.papermc.io/paper-{id}.jar"),
            size: 100,
            checksums: Checksums {
                sha256: Some("ab".repeat(32)),
            },
        },
    );
    Build {
        id,
        time: None,
        channel,
        commits: Vec::new(),
        downloads,
    }
}

fn paper() -> FakeSource {
    FakeSource::default().with_project(
        "paper",
        &[
            ("1.21", &["1.21.11", "1.21.11-rc3", "1.21.10"]),
            ("1.7", &["1.7.10"]),
        ],
    )
}

#[tokio::test]
async fn test_project_versions_are_ordered() {
    let source = paper();
    let versions = project_versions(&source, "paper").await.unwrap();
    assert_eq!(versions, ["1.7.10", "1.21.10", "1.21.11-rc3", "1.21.11"]);
}

#[tokio::test]
async fn test_project_without_versions() {
    let source = FakeSource::default().with_project("folia", &[("1.21", &[])]);
    let err = project_versions(&source, "folia").await.unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound(NotFoundError::NoVersions { ref project }) if project == "folia"
    ));
}

#[tokio::test]
async fn test_recommended_and_latest_version() {
    let source = FakeSource::default().with_project(
        "paper",
        &[("1.21", &["1.21.10", "1.21.11-rc3"])],
    );
    let (tx, _rx) = channel();
    assert_eq!(
        recommended_version(&source, "paper", &tx).await.unwrap(),
        "1.21.10"
    );
    assert_eq!(
        latest_version(&source, "paper", &tx).await.unwrap(),
        "1.21.11-rc3"
    );
}

#[tokio::test]
async fn test_promotion_prefers_recommended() {
    let source = paper().with_builds(
        "paper",
        "1.21.11",
        vec![
            build(40, Channel::Recommended),
            build(45, Channel::Stable),
            build(50, Channel::Alpha),
        ],
    );
    let (tx, _rx) = channel();

    let id = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap();
    assert_eq!(id, 40);
}

#[tokio::test]
async fn test_promotion_falls_back_to_max_stable() {
    let source = paper().with_builds(
        "paper",
        "1.21.11",
        vec![
            build(41, Channel::Stable),
            build(44, Channel::Stable),
            build(42, Channel::Stable),
            build(50, Channel::Beta),
        ],
    );
    let (tx, mut rx) = channel();

    let id = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap();
    assert_eq!(id, 44);

    let first = rx.recv().await.unwrap();
    assert!(matches!(
        first,
        AppEvent::Resolver(ResolverEvent::StrategySkipped { ref strategy, .. })
            if strategy == "channel:recommended"
    ));
    let second = rx.recv().await.unwrap();
    assert!(matches!(
        second,
        AppEvent::Resolver(ResolverEvent::BuildSelected { build: 44, .. })
    ));
}

#[tokio::test]
async fn test_promotion_uses_latest_shortcut_last() {
    let source = paper().with_builds(
        "paper",
        "1.21.11",
        vec![build(3, Channel::Alpha), build(5, Channel::Beta)],
    );
    let (tx, _rx) = channel();

    let id = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap();
    assert_eq!(id, 5);
    assert!(source.calls().iter().any(|c| c == "latest 1.21.11"));
}

#[tokio::test]
async fn test_promotion_exhausted_is_no_builds() {
    let source = paper();
    let (tx, _rx) = channel();

    let err = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound(NotFoundError::NoBuilds { .. })
    ));
}

#[tokio::test]
async fn test_promotion_hard_failure_surfaces() {
    let mut source = paper().with_builds("paper", "1.21.11", vec![build(9, Channel::Stable)]);
    source.broken_channel = Some(Channel::Recommended);
    let (tx, _rx) = channel();

    let err = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(NetworkError::Connection(_))));
    // Stable was never consulted
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn test_custom_strategy_order() {
    let source = paper().with_builds(
        "paper",
        "1.21.11",
        vec![build(40, Channel::Recommended), build(45, Channel::Stable)],
    );
    let (tx, _rx) = channel();

    let id = find_promoted_build_with(
        &source,
        "paper",
        "1.21.11",
        &[PromotionStrategy::ByChannel(Channel::Stable)],
        &tx,
    )
    .await
    .unwrap();
    assert_eq!(id, 45);
}

#[tokio::test]
async fn test_latest_build_with_channel() {
    let source = paper().with_builds(
        "paper",
        "1.21.11",
        vec![
            build(41, Channel::Stable),
            build(43, Channel::Stable),
            build(50, Channel::Alpha),
        ],
    );

    let stable = latest_build(&source, "paper", "1.21.11", Some(Channel::Stable))
        .await
        .unwrap();
    assert_eq!(stable.id, 43);

    let any = latest_build(&source, "paper", "1.21.11", None).await.unwrap();
    assert_eq!(any.id, 50);

    let err = latest_build(&source, "paper", "1.21.11", Some(Channel::Recommended))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::NoBuilds { .. })));
}

#[tokio::test]
async fn test_resolve_target_defaults() {
    let source = paper()
        .with_builds("paper", "1.21.11", vec![build(60, Channel::Stable)])
        .with_builds("paper", "1.21.11-rc3", vec![build(70, Channel::Alpha)]);
    let (tx, _rx) = channel();

    let resolved = resolve_target(&source, "paper", None, None, &QueryOptions::default(), &tx)
        .await
        .unwrap();
    assert_eq!(resolved.version, "1.21.11");
    assert_eq!(resolved.build, 60);
    assert_eq!(resolved.key, DEFAULT_ARTIFACT_KEY);
    assert_eq!(resolved.file_name(), "paper-60.jar");
    assert_eq!(resolved.url(), "https://fill-data.papermc.io/paper-60.jar");
}

#[tokio::test]
async fn test_resolve_target_explicit_build() {
    let source = paper().with_builds(
        "paper",
        "1.21.10",
        vec![build(10, Channel::Stable), build(11, Channel::Stable)],
    );
    let (tx, _rx) = channel();

    let resolved = resolve_target(
        &source,
        "paper",
        Some("1.21.10"),
        Some(10),
        &QueryOptions::default(),
        &tx,
    )
    .await
    .unwrap();
    assert_eq!(resolved.build, 10);

    let direct = resolve_artifact(&source, "paper", "1.21.10", 11, &tx)
        .await
        .unwrap();
    assert_eq!(direct.artifact.name, "paper-11.jar");
}

#[tokio::test]
async fn test_matrix_newest_versions_oldest_first() {
    let source = paper()
        .with_builds("paper", "1.21.11", vec![build(60, Channel::Stable)])
        .with_builds("paper", "1.21.10", vec![build(50, Channel::Stable)])
        .with_builds("paper", "1.7.10", vec![build(10, Channel::Stable)]);
    let (tx, mut rx) = channel();

    let matrix = build_matrix(&source, "paper", &QueryOptions::new(Some(2), None), &tx)
        .await
        .unwrap();

    // 1.21.11-rc3 has no builds and is skipped without using up the limit
    let rows: Vec<_> = matrix
        .iter()
        .map(|e| (e.version.as_str(), e.build))
        .collect();
    assert_eq!(rows, [("1.21.10", 50), ("1.21.11", 60)]);

    let mut skipped = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Resolver(ResolverEvent::VersionSkipped { version, .. }) = event {
            skipped.push(version);
        }
    }
    assert_eq!(skipped, ["1.21.11-rc3"]);
}

#[tokio::test]
async fn test_matrix_channel_filter_and_missing_url() {
    let mut no_url = build(61, Channel::Stable);
    no_url.downloads = ArtifactList::new();
    let source = paper()
        .with_builds("paper", "1.21.11", vec![no_url, build(62, Channel::Alpha)])
        .with_builds("paper", "1.21.10", vec![build(50, Channel::Stable)])
        .with_builds("paper", "1.7.10", vec![build(10, Channel::Alpha)]);
    let (tx, _rx) = channel();

    let matrix = build_matrix(
        &source,
        "paper",
        &QueryOptions::new(None, Some(Channel::Stable)),
        &tx,
    )
    .await
    .unwrap();

    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix[0].version, "1.21.10");
    assert_eq!(matrix[0].url, "https://fill-data.papermc.io/paper-50.jar");
}

fn build_body(id: u32, channel: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "channel": channel,
        "downloads": {
            "server:default": {
                "name": format!("paper-1.21.11-{id}.jar"),
                "url": format!("https://fill-data.papermc.io/paper-1.21.11-{id}.jar"),
                "checksums": {}
            }
        }
    })
}

#[tokio::test]
async fn test_promotion_over_http_ignores_display_limit() {
    use httpmock::prelude::*;
    use papermc_net::{FillClient, NetClient};
    use tokio_util::sync::CancellationToken;

    let server = MockServer::start_async().await;
    let builds_path = "/v3/projects/paper/versions/1.21.11/builds";
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(builds_path)
                .query_param("channel", "RECOMMENDED");
            then.status(200).json_body(serde_json::json!([build_body(10, "RECOMMENDED")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(builds_path)
                .query_param("channel", "STABLE");
            then.status(200).json_body(serde_json::json!([build_body(12, "STABLE")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{builds_path}/latest"));
            then.status(200).json_body(build_body(15, "ALPHA"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{builds_path}/10"));
            then.status(200).json_body(build_body(10, "RECOMMENDED"));
        })
        .await;

    let source = FillClient::new(
        NetClient::with_defaults().unwrap(),
        &server.base_url(),
        CancellationToken::new(),
        None,
    )
    .unwrap();
    let (tx, _rx) = channel();

    let promoted = find_promoted_build(&source, "paper", "1.21.11", &tx)
        .await
        .unwrap();
    assert_eq!(promoted, 10);

    // A listing limit only shapes what is shown, never which build is chosen
    let resolved = resolve_target(
        &source,
        "paper",
        Some("1.21.11"),
        None,
        &QueryOptions::new(Some(1), None),
        &tx,
    )
    .await
    .unwrap();
    assert_eq!(resolved.build, 10);
}
