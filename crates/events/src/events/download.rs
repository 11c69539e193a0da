use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events emitted while streaming an artifact to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    Started {
        url: String,
        destination: PathBuf,
        total_size: Option<u64>,
    },

    Progress {
        url: String,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    Completed {
        url: String,
        destination: PathBuf,
        final_size: u64,
        sha256: String,
        verified: bool,
    },

    /// Digest of the written bytes differs from the published checksum
    ChecksumMismatch {
        url: String,
        destination: PathBuf,
        expected: String,
        actual: String,
    },
}
