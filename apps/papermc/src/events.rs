//! Event handling and progress display

use console::Term;
use papermc_events::{AppEvent, DownloadEvent};

use crate::logging::log_event_with_tracing;

/// Event handler for progress display and user feedback
pub struct EventHandler {
    /// Where the progress line is drawn
    term: Term,
    /// Draw a live progress line for downloads
    show_progress: bool,
}

impl EventHandler {
    /// Create new event handler
    ///
    /// Progress is only drawn on an interactive stderr and never in JSON mode.
    pub fn new(json_mode: bool) -> Self {
        let term = Term::stderr();
        let show_progress = !json_mode && term.is_term();
        Self {
            term,
            show_progress,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: &AppEvent) {
        log_event_with_tracing(event);

        if !self.show_progress {
            return;
        }

        match event {
            AppEvent::Download(DownloadEvent::Progress {
                bytes_downloaded,
                total_bytes,
                ..
            }) => self.draw_progress(*bytes_downloaded, *total_bytes),
            AppEvent::Download(
                DownloadEvent::Completed { .. } | DownloadEvent::ChecksumMismatch { .. },
            ) => {
                let _ = self.term.clear_line();
            }
            _ => {}
        }
    }

    fn draw_progress(&self, downloaded: u64, total: Option<u64>) {
        let line = match total.filter(|total| *total > 0) {
            Some(total) => format!(
                "Downloading {} / {} ({}%)",
                format_size(downloaded),
                format_size(total),
                downloaded.saturating_mul(100) / total
            ),
            None => format!("Downloading {}", format_size(downloaded)),
        };
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&line);
    }
}

/// Format byte count as human-readable size
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit_index])
    }
}
