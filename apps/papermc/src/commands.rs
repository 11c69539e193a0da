//! Command implementations

use papermc_config::Config;
use papermc_errors::Error;
use papermc_events::{EventEmitter, EventSender};
use papermc_net::{fetch, FillClient, MetadataSource, NetClient, NetConfig};
use papermc_resolver::{
    build_matrix, latest_version, project_versions, resolve_target, GithubMatrix, MatrixEntry,
    ResolvedArtifact,
};
use papermc_types::{Build, DownloadResult, ProjectDetail, QueryOptions};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::cli::{CiCommands, Commands, ListCommands};
use crate::error::CliError;

/// Everything a command needs, built once per invocation
pub struct AppContext {
    pub config: Config,
    pub source: FillClient,
    pub events: EventSender,
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Wire the metadata client from the merged configuration
    pub fn new(
        config: Config,
        events: EventSender,
        cancel: CancellationToken,
    ) -> Result<Self, CliError> {
        let net = NetClient::new(NetConfig::from(&config.api))?;
        let source = FillClient::new(
            net,
            &config.api.base_url,
            cancel.clone(),
            Some(events.clone()),
        )?;

        Ok(Self {
            config,
            source,
            events,
            cancel,
        })
    }

    fn options(&self) -> QueryOptions {
        self.config.query_options()
    }
}

/// Result of a command, rendered by [`crate::display::OutputRenderer`]
#[derive(Debug)]
pub enum CommandOutput {
    Projects(Vec<ProjectDetail>),
    Versions(Vec<String>),
    Builds(Vec<Build>),
    Url(String),
    Saved(DownloadResult),
    Matrix(Vec<MatrixEntry>),
    GithubMatrix(GithubMatrix),
    Text(String),
}

/// Execute the specified command
pub async fn execute_command(
    command: Commands,
    ctx: AppContext,
) -> Result<CommandOutput, CliError> {
    match command {
        Commands::List(list) => match list {
            ListCommands::Projects => {
                let projects = ctx.source.list_projects().await?;
                Ok(CommandOutput::Projects(ctx.options().apply_limit(projects)))
            }
            ListCommands::Versions { project } => {
                let versions = list_versions(&ctx, &project).await?;
                Ok(CommandOutput::Versions(versions))
            }
            ListCommands::Builds { project, version } => {
                let options = ctx.options();
                let channels: Vec<_> = options.channel.into_iter().collect();
                let builds = ctx.source.builds(&project, &version, &channels).await?;
                Ok(CommandOutput::Builds(options.apply_limit(builds)))
            }
        },

        Commands::Download {
            project,
            version,
            build,
            destination: _,
            force,
            keep_invalid,
        } => {
            let target = resolve(&ctx, &project, version.as_deref(), build).await?;
            let result = download(&ctx, &target, force, keep_invalid).await?;
            Ok(CommandOutput::Saved(result))
        }

        Commands::GetUrl {
            project,
            version,
            build,
        } => {
            let target = resolve(&ctx, &project, version.as_deref(), build).await?;
            Ok(CommandOutput::Url(target.url().to_string()))
        }

        Commands::Ci(ci) => match ci {
            CiCommands::Matrix { project } => {
                let entries =
                    build_matrix(&ctx.source, &project, &ctx.options(), &ctx.events).await?;
                Ok(CommandOutput::Matrix(entries))
            }
            CiCommands::GithubActions { project } => {
                let entries =
                    build_matrix(&ctx.source, &project, &ctx.options(), &ctx.events).await?;
                Ok(CommandOutput::GithubMatrix(entries.into()))
            }
            CiCommands::Latest { project } => {
                let version = latest_version(&ctx.source, &project, &ctx.events).await?;
                Ok(CommandOutput::Text(version))
            }
        },

        Commands::Version => Ok(CommandOutput::Text(version_string())),
    }
}

/// `papermc <version>` as printed by the `version` command
pub fn version_string() -> String {
    format!("papermc {}", env!("CARGO_PKG_VERSION"))
}

/// Ordered versions, newest first, limited to the newest N
async fn list_versions(ctx: &AppContext, project: &str) -> Result<Vec<String>, Error> {
    let versions = project_versions(&ctx.source, project).await?;
    let mut versions = ctx.options().apply_limit(versions);
    versions.reverse();
    Ok(versions)
}

async fn resolve(
    ctx: &AppContext,
    project: &str,
    version: Option<&str>,
    build: Option<u32>,
) -> Result<ResolvedArtifact, Error> {
    resolve_target(
        &ctx.source,
        project,
        version,
        build,
        &ctx.options(),
        &ctx.events,
    )
    .await
}

/// Fetch the resolved artifact into the destination directory
///
/// A checksum mismatch deletes the file unless `keep_invalid` is set, and
/// is always reported as an error.
async fn download(
    ctx: &AppContext,
    target: &ResolvedArtifact,
    force: bool,
    keep_invalid: bool,
) -> Result<DownloadResult, CliError> {
    let dest = destination_path(&ctx.config.destination_dir(), target)?;

    if force {
        remove_existing(&dest).await?;
    }

    match fetch(
        ctx.source.net(),
        &target.artifact,
        &dest,
        &ctx.cancel,
        &ctx.events,
    )
    .await
    {
        Ok(result) => Ok(result),
        Err(err) => {
            let Some(result) = err.download_result().cloned() else {
                return Err(err.into());
            };
            if !keep_invalid {
                if let Err(e) = tokio::fs::remove_file(&result.path).await {
                    ctx.events.emit_warning(format!(
                        "could not delete {}: {e}",
                        result.path.display()
                    ));
                }
            }
            Err(CliError::Integrity {
                result,
                kept: keep_invalid,
            })
        }
    }
}

/// `dir/<artifact file name>`, refusing names that would leave `dir`
fn destination_path(dir: &Path, target: &ResolvedArtifact) -> Result<PathBuf, CliError> {
    let name = target.file_name();
    match Path::new(name).file_name() {
        Some(file_name) if file_name == name => Ok(dir.join(file_name)),
        _ => Err(CliError::InvalidArguments(format!(
            "refusing to save artifact with unsafe file name `{name}`"
        ))),
    }
}

async fn remove_existing(path: &Path) -> Result<(), CliError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io_with_path(&e, path).into()),
    }
}
