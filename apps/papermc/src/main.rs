//! papermc - resolve and download verified PaperMC server builds
//!
//! This is the CLI front end. It merges configuration, wires the metadata
//! client and hands each command to the resolver and network crates while
//! draining their events.

mod cli;
mod commands;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::commands::{execute_command, version_string, AppContext, CommandOutput};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use crate::logging::init_tracing;
use clap::Parser;
use papermc_config::Config;
use papermc_events::EventReceiver;
use std::process;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();

    init_tracing(cli.global.json, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting papermc v{}", env!("CARGO_PKG_VERSION"));

    let renderer = OutputRenderer::new(cli.global.json);

    // Answer without touching config or network
    if matches!(cli.command, Commands::Version) {
        renderer.render_result(&CommandOutput::Text(version_string()))?;
        return Ok(());
    }

    // Configuration precedence: file (or defaults) < environment < flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    config.apply_overrides(cli.overrides())?;

    let (event_sender, event_receiver) = papermc_events::channel();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let ctx = AppContext::new(config, event_sender, cancel)?;
    let mut event_handler = EventHandler::new(cli.global.json);

    let result =
        execute_command_with_events(cli.command, ctx, event_receiver, &mut event_handler).await?;

    renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    ctx: AppContext,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<CommandOutput, CliError> {
    let mut command_future = Box::pin(execute_command(command, ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(&event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(&event);
                }
            }
        }
    }
}
