#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for papermc
//!
//! This crate provides fine-grained error types organized by domain and a
//! single [`Error`] used across crate boundaries. All error types implement
//! Clone so a failed download can hand its partial result back to callers.

use std::borrow::Cow;

use papermc_types::DownloadResult;
use thiserror::Error;

pub mod config;
pub mod decode;
pub mod integrity;
pub mod lookup;
pub mod network;

// Re-export all error types at the root
pub use config::ConfigError;
pub use decode::DecodingError;
pub use integrity::IntegrityError;
pub use lookup::NotFoundError;
pub use network::NetworkError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("no version identifiers to order")]
    EmptyInput,

    #[error("{0}")]
    Decoding(#[from] DecodingError),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// The completed-but-mismatched download, if this is an integrity failure
    #[must_use]
    pub fn download_result(&self) -> Option<&DownloadResult> {
        match self {
            Self::Integrity(err) => Some(err.result()),
            _ => None,
        }
    }

    /// Whether this error means "nothing matched" rather than a failure
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::EmptyInput)
            || matches!(self, Self::Network(NetworkError::HttpError { status: 404, .. }))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding(DecodingError::new("JSON payload", err.to_string()))
    }
}

/// Result type alias for papermc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::NotFound(err) => err.user_message(),
            Error::Decoding(err) => err.user_message(),
            Error::Integrity(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Io {
                message,
                path: Some(path),
                ..
            } => Cow::Owned(format!("{message} ({})", path.display())),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::NotFound(err) => err.user_hint(),
            Error::Decoding(err) => err.user_hint(),
            Error::Integrity(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Io {
                kind: std::io::ErrorKind::AlreadyExists,
                ..
            } => Some("The destination already exists; pass --force to replace it."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            Error::Io { kind, .. } => *kind != std::io::ErrorKind::AlreadyExists,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::NotFound(err) => err.user_code(),
            Error::Decoding(err) => err.user_code(),
            Error::Integrity(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::EmptyInput => Some("not_found.empty_input"),
            Error::Cancelled => Some("error.cancelled"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
