//! Streaming artifact download with SHA-256 verification

use futures::StreamExt;
use papermc_errors::{Error, IntegrityError, NetworkError};
use papermc_events::{EventEmitter, EventSender};
use papermc_hash::{Sha256Digest, StreamHasher};
use papermc_types::{Artifact, DownloadResult};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::client::map_reqwest_error;
use crate::NetClient;

/// Progress events are emitted at most once per this many bytes
const PROGRESS_STEP: u64 = 256 * 1024;

/// Download `artifact` to `dest`, hashing every chunk on the way through
///
/// The destination must not exist: it is opened with exclusive create, so a
/// colliding path fails with an `Io` error of kind `AlreadyExists`. Missing
/// parent directories are created. The whole transfer is bounded by the
/// client's configured timeout. If the transfer fails part way, the partial
/// file is removed.
///
/// On a checksum mismatch the file is left on disk and the returned
/// `Integrity` error carries the [`DownloadResult`]. An artifact without a
/// published checksum is reported as valid.
///
/// # Errors
///
/// Returns `Cancelled` if `cancel` fires, `Network` for transport failures
/// or an elapsed deadline, `Io` for filesystem failures, and `Integrity`
/// when the digest does not match.
pub async fn fetch(
    client: &NetClient,
    artifact: &Artifact,
    dest: &Path,
    cancel: &CancellationToken,
    tx: &EventSender,
) -> Result<DownloadResult, Error> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }

    let file = create_exclusive(dest).await?;

    let deadline = client.config().timeout;
    let copied = match tokio::time::timeout(
        deadline,
        stream_to_file(client, artifact, file, dest, cancel, tx),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(NetworkError::Timeout {
            url: artifact.url.clone(),
        }
        .into()),
    };

    let (size, digest) = match copied {
        Ok(copied) => copied,
        Err(err) => {
            // Only an incomplete file of our own making is removed
            let _ = tokio::fs::remove_file(dest).await;
            return Err(err);
        }
    };

    let actual_sha256 = digest.to_hex();
    let expected_sha256 = artifact.expected_sha256().map(str::to_ascii_lowercase);
    let valid = expected_sha256
        .as_deref()
        .is_none_or(|expected| digest.matches_hex(expected));

    let result = DownloadResult {
        path: dest.to_path_buf(),
        size,
        expected_sha256,
        actual_sha256,
        valid,
    };

    if !result.valid {
        tx.emit_checksum_mismatch(
            &artifact.url,
            dest,
            result.expected_sha256.as_deref().unwrap_or_default(),
            &result.actual_sha256,
        );
        return Err(IntegrityError::new(result).into());
    }

    tx.emit_download_completed(
        &artifact.url,
        dest,
        size,
        &result.actual_sha256,
        result.was_verified(),
    );
    Ok(result)
}

async fn stream_to_file(
    client: &NetClient,
    artifact: &Artifact,
    mut file: File,
    dest: &Path,
    cancel: &CancellationToken,
    tx: &EventSender,
) -> Result<(u64, Sha256Digest), Error> {
    let response = client.get(&artifact.url, cancel).await?;
    let total = response
        .content_length()
        .or((artifact.size > 0).then_some(artifact.size));
    tx.emit_download_started(&artifact.url, dest, total);

    let mut stream = response.bytes_stream();
    let mut hasher = StreamHasher::new();
    let mut last_reported = 0u64;

    loop {
        let chunk = tokio::select! {
            () = cancel.cancelled() => return Err(Error::Cancelled),
            next = stream.next() => next,
        };
        let Some(chunk) = chunk else {
            break;
        };
        let chunk = chunk.map_err(|e| map_reqwest_error(&e, &artifact.url))?;

        hasher.update(&chunk);
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::io_with_path(&e, dest))?;

        let downloaded = hasher.bytes_hashed();
        if downloaded - last_reported >= PROGRESS_STEP {
            last_reported = downloaded;
            tx.emit_download_progress(&artifact.url, downloaded, total);
        }
    }

    file.flush()
        .await
        .map_err(|e| Error::io_with_path(&e, dest))?;

    let size = hasher.bytes_hashed();
    Ok((size, hasher.finalize()))
}

async fn create_exclusive(dest: &Path) -> Result<File, Error> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .await
        .map_err(|e| Error::io_with_path(&e, dest))
}
