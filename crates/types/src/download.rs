//! Outcome of a verified download

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a completed download wrote and whether its digest checked out
///
/// Produced only when the byte stream ran to the end. A mismatch still yields
/// one of these (with `valid == false`) so the caller can inspect the file
/// before deciding to delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub size: u64,
    pub expected_sha256: Option<String>,
    pub actual_sha256: String,
    pub valid: bool,
}

impl DownloadResult {
    /// Whether a checksum was published to verify against
    #[must_use]
    pub fn was_verified(&self) -> bool {
        self.expected_sha256.is_some()
    }
}
