#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in papermc
//!
//! Library crates never print or log directly. They emit [`AppEvent`]s on an
//! unbounded channel and the CLI decides how to render them.

pub mod meta;
pub use meta::{EventLevel, EventSource};

pub mod events;
pub use events::{
    AppEvent, DownloadEvent, FailureContext, GeneralEvent, ResolverEvent,
};

use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout papermc
///
/// Implemented for the raw `EventSender` and for anything that may hold one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Receiver gone means nobody is listening
            let _ = sender.send(event);
        }
    }

    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    fn emit_request(&self, method: &str, url: &str) {
        self.emit(AppEvent::General(GeneralEvent::Request {
            method: method.to_string(),
            url: url.to_string(),
        }));
    }

    fn emit_download_started(&self, url: &str, destination: &Path, total_size: Option<u64>) {
        self.emit(AppEvent::Download(DownloadEvent::Started {
            url: url.to_string(),
            destination: destination.to_path_buf(),
            total_size,
        }));
    }

    fn emit_download_progress(&self, url: &str, bytes_downloaded: u64, total_bytes: Option<u64>) {
        self.emit(AppEvent::Download(DownloadEvent::Progress {
            url: url.to_string(),
            bytes_downloaded,
            total_bytes,
        }));
    }

    fn emit_download_completed(
        &self,
        url: &str,
        destination: &Path,
        final_size: u64,
        sha256: &str,
        verified: bool,
    ) {
        self.emit(AppEvent::Download(DownloadEvent::Completed {
            url: url.to_string(),
            destination: destination.to_path_buf(),
            final_size,
            sha256: sha256.to_string(),
            verified,
        }));
    }

    fn emit_checksum_mismatch(&self, url: &str, destination: &Path, expected: &str, actual: &str) {
        self.emit(AppEvent::Download(DownloadEvent::ChecksumMismatch {
            url: url.to_string(),
            destination: destination.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

/// Emitting through `None` is a no-op, for callers without a listener
impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
