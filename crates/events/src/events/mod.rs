use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use papermc_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod download;
pub mod general;
pub mod resolver;

pub use download::*;
pub use general::*;
pub use resolver::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    General(GeneralEvent),
    Download(DownloadEvent),
    Resolver(ResolverEvent),
}

impl AppEvent {
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Download(_) => EventSource::DOWNLOAD,
            Self::Resolver(_) => EventSource::RESOLVER,
        }
    }

    /// Severity used when the event is written to the log
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::General(GeneralEvent::OperationFailed { .. })
            | Self::Download(DownloadEvent::ChecksumMismatch { .. }) => EventLevel::Error,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Resolver(ResolverEvent::VersionSkipped { .. }) => EventLevel::Warn,

            Self::Download(DownloadEvent::Progress { .. }) => EventLevel::Trace,

            Self::General(GeneralEvent::DebugLog { .. } | GeneralEvent::Request { .. })
            | Self::Resolver(ResolverEvent::StrategySkipped { .. }) => EventLevel::Debug,

            _ => EventLevel::Info,
        }
    }

    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        self.level().into()
    }

    /// Get the log target for this event
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "papermc::events::general",
            Self::Download(_) => "papermc::events::download",
            Self::Resolver(_) => "papermc::events::resolver",
        }
    }

    /// One-line human summary used as the log message
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::General(GeneralEvent::Warning { message, context }) => match context {
                Some(context) => format!("{message} ({context})"),
                None => message.clone(),
            },
            Self::General(GeneralEvent::DebugLog { message }) => message.clone(),
            Self::General(GeneralEvent::Request { method, url }) => format!("{method} {url}"),
            Self::General(GeneralEvent::OperationFailed { operation, failure }) => {
                format!("{operation} failed: {}", failure.message)
            }
            Self::Download(DownloadEvent::Started {
                url, destination, ..
            }) => format!("downloading {url} to {}", destination.display()),
            Self::Download(DownloadEvent::Progress {
                bytes_downloaded,
                total_bytes,
                ..
            }) => match total_bytes {
                Some(total) => format!("{bytes_downloaded}/{total} bytes"),
                None => format!("{bytes_downloaded} bytes"),
            },
            Self::Download(DownloadEvent::Completed {
                destination,
                final_size,
                verified,
                ..
            }) => format!(
                "saved {} ({final_size} bytes, {})",
                destination.display(),
                if *verified { "verified" } else { "no checksum" }
            ),
            Self::Download(DownloadEvent::ChecksumMismatch {
                destination,
                expected,
                actual,
                ..
            }) => format!(
                "checksum mismatch for {}: expected {expected}, got {actual}",
                destination.display()
            ),
            Self::Resolver(ResolverEvent::VersionSelected {
                project,
                version,
                policy,
            }) => format!("{policy} version of {project} is {version}"),
            Self::Resolver(ResolverEvent::StrategySkipped {
                project,
                version,
                strategy,
            }) => format!("{strategy}: no build for {project} {version}"),
            Self::Resolver(ResolverEvent::BuildSelected {
                project,
                version,
                build,
                strategy,
            }) => format!("selected {project} {version} build {build} via {strategy}"),
            Self::Resolver(ResolverEvent::ArtifactSelected { build, key, name }) => {
                format!("build {build} artifact {key} ({name})")
            }
            Self::Resolver(ResolverEvent::VersionSkipped {
                project,
                version,
                reason,
            }) => format!("skipping {project} {version}: {reason}"),
        }
    }
}
