//! Metadata service client for the Fill v3 API

use async_trait::async_trait;
use papermc_errors::{DecodingError, Error, NetworkError};
use papermc_events::{EventEmitter, EventSender};
use papermc_types::{
    Build, Channel, ProjectDetail, ProjectList, VersionDetail,
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::NetClient;

/// Read-only view of the release metadata service
///
/// The resolver only talks to this trait, so tests can substitute an
/// in-memory source.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// All projects with their version groups
    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, Error>;

    /// One project with its version groups
    async fn project(&self, project: &str) -> Result<ProjectDetail, Error>;

    /// One version with its build ids, oldest first
    async fn version(&self, project: &str, version: &str) -> Result<VersionDetail, Error>;

    /// Builds of a version, oldest first; an empty filter means every channel
    async fn builds(
        &self,
        project: &str,
        version: &str,
        channels: &[Channel],
    ) -> Result<Vec<Build>, Error>;

    /// The service's own notion of the newest build (no channel filter)
    async fn latest_build(&self, project: &str, version: &str) -> Result<Build, Error>;

    async fn build(&self, project: &str, version: &str, id: u32) -> Result<Build, Error>;
}

/// [`MetadataSource`] backed by the Fill HTTP API
#[derive(Clone)]
pub struct FillClient {
    client: NetClient,
    base_url: Url,
    cancel: CancellationToken,
    events: Option<EventSender>,
}

impl FillClient {
    /// Create a client for the service rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` is not an absolute http(s) URL.
    pub fn new(
        client: NetClient,
        base_url: &str,
        cancel: CancellationToken,
        events: Option<EventSender>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(base_url.to_string()).into());
        }

        Ok(Self {
            client,
            base_url,
            cancel,
            events,
        })
    }

    #[must_use]
    pub fn net(&self) -> &NetClient {
        &self.client
    }

    /// Build `{base}/v3/projects/{segments...}` with each segment escaped
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["v3", "projects"]).extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url, what: &str) -> Result<T, Error> {
        self.events.emit_request("GET", url.as_str());
        let body = self.client.get_bytes(url.as_str(), &self.cancel).await?;
        // from_slice keeps map order intact for ordered artifact lists
        serde_json::from_slice(&body).map_err(|e| DecodingError::new(what, e.to_string()).into())
    }
}

#[async_trait]
impl MetadataSource for FillClient {
    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, Error> {
        let url = self.endpoint(&[]);
        let list: ProjectList = self.get_json(&url, "project list").await?;
        Ok(list.projects)
    }

    async fn project(&self, project: &str) -> Result<ProjectDetail, Error> {
        let url = self.endpoint(&[project]);
        self.get_json(&url, "project").await
    }

    async fn version(&self, project: &str, version: &str) -> Result<VersionDetail, Error> {
        let url = self.endpoint(&[project, "versions", version]);
        let mut detail: VersionDetail = self.get_json(&url, "version").await?;
        detail.builds.sort_unstable();
        Ok(detail)
    }

    async fn builds(
        &self,
        project: &str,
        version: &str,
        channels: &[Channel],
    ) -> Result<Vec<Build>, Error> {
        let mut url = self.endpoint(&[project, "versions", version, "builds"]);
        if !channels.is_empty() {
            let mut query = url.query_pairs_mut();
            for channel in channels {
                query.append_pair("channel", channel.as_api_str());
            }
        }

        let mut builds: Vec<Build> = self.get_json(&url, "build list").await?;
        // The service does not promise an order
        builds.sort_by_key(|build| build.id);
        Ok(builds)
    }

    async fn latest_build(&self, project: &str, version: &str) -> Result<Build, Error> {
        let url = self.endpoint(&[project, "versions", version, "builds", "latest"]);
        self.get_json(&url, "build").await
    }

    async fn build(&self, project: &str, version: &str, id: u32) -> Result<Build, Error> {
        let id = id.to_string();
        let url = self.endpoint(&[project, "versions", version, "builds", &id]);
        self.get_json(&url, "build").await
    }
}
