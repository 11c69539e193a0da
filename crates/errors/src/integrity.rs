//! Checksum verification failures

use std::borrow::Cow;
use std::fmt;

use papermc_types::DownloadResult;

use crate::UserFacingError;

/// A download that completed but whose digest did not match
///
/// Carries the full [`DownloadResult`] so the caller can inspect or remove
/// the file that was written.
#[derive(Debug, Clone)]
pub struct IntegrityError {
    pub result: DownloadResult,
}

impl IntegrityError {
    #[must_use]
    pub fn new(result: DownloadResult) -> Self {
        Self { result }
    }

    #[must_use]
    pub fn result(&self) -> &DownloadResult {
        &self.result
    }

    #[must_use]
    pub fn into_result(self) -> DownloadResult {
        self.result
    }
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SHA-256 mismatch for {}: expected {}, got {}",
            self.result.path.display(),
            self.result.expected_sha256.as_deref().unwrap_or("<none>"),
            self.result.actual_sha256
        )
    }
}

impl std::error::Error for IntegrityError {}

impl UserFacingError for IntegrityError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("The downloaded file cannot be trusted. Delete it and download again.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some("integrity.checksum_mismatch")
    }
}
