//! Transport error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("HTTP error {status} from {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("download stream interrupted: {0}")]
    Stream(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } => Some("Increase --timeout or check your connection."),
            Self::Connection(_) | Self::RequestFailed(_) => {
                Some("Check your network connection and the configured base URL.")
            }
            Self::HttpError { status: 404, .. } => {
                Some("Check the project, version and build identifiers.")
            }
            Self::InvalidUrl(_) => Some("Fix the base URL in the configuration."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. }
            | Self::Connection(_)
            | Self::Stream(_)
            | Self::RequestFailed(_) => true,
            Self::HttpError { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidUrl(_) | Self::ClientBuild(_) => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Timeout { .. } => "network.timeout",
            Self::Connection(_) => "network.connection",
            Self::HttpError { .. } => "network.http_error",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::Stream(_) => "network.stream",
            Self::RequestFailed(_) => "network.request_failed",
            Self::ClientBuild(_) => "network.client_build",
        };
        Some(code)
    }
}
