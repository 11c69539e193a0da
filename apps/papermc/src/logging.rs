//! Tracing setup and structured logging of events
//!
//! Library crates report through the event channel. Every event that reaches
//! the CLI is turned into a tracing record at the event's own level so
//! `RUST_LOG` filters apply to it like any other log line.

use papermc_events::{AppEvent, EventLevel};
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for papermc's own targets with `--debug`. Logs go to stderr so
/// stdout stays machine readable.
pub fn init_tracing(json_mode: bool, debug_enabled: bool) {
    let default_directive = if debug_enabled {
        "warn,papermc=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json_mode {
        builder.json().init();
    } else {
        builder.with_target(debug_enabled).init();
    }
}

/// Log an `AppEvent` at its level with its source as a structured field
pub fn log_event_with_tracing(event: &AppEvent) {
    let source = event.event_source();
    let source = source.as_str();
    let target = event.log_target();
    let summary = event.summary();

    match event.level() {
        EventLevel::Trace => trace!(source, event_target = target, "{summary}"),
        EventLevel::Debug => debug!(source, event_target = target, "{summary}"),
        EventLevel::Info => info!(source, event_target = target, "{summary}"),
        EventLevel::Warn => warn!(source, event_target = target, "{summary}"),
        EventLevel::Error => error!(source, event_target = target, "{summary}"),
    }
}
