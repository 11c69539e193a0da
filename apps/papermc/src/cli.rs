//! Command line interface definition

use clap::{Parser, Subcommand};
use papermc_config::Overrides;
use papermc_types::Channel;
use std::path::PathBuf;

/// papermc - resolve and download verified PaperMC server builds
#[derive(Parser)]
#[command(name = "papermc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and download verified PaperMC server builds")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Metadata service root URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Keep only the newest N entries of a listing
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Only consider builds on this channel
    #[arg(long, global = true, value_enum)]
    pub channel: Option<Channel>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List projects, versions or builds
    #[command(subcommand, alias = "ls")]
    List(ListCommands),

    /// Download a build's server artifact and verify its checksum
    Download {
        /// Project id (e.g. paper, velocity)
        project: String,

        /// Version id (default: recommended version)
        version: Option<String>,

        /// Build number (default: promoted build)
        build: Option<u32>,

        /// Directory to save into
        #[arg(short = 'd', long = "destination", value_name = "DIR")]
        destination: Option<PathBuf>,

        /// Replace an existing file at the destination
        #[arg(long)]
        force: bool,

        /// Keep the file when its checksum does not match
        #[arg(long)]
        keep_invalid: bool,
    },

    /// Print the download URL of a build's server artifact
    #[command(alias = "url")]
    GetUrl {
        /// Project id
        project: String,

        /// Version id (default: recommended version)
        version: Option<String>,

        /// Build number (default: promoted build)
        build: Option<u32>,
    },

    /// Output for CI pipelines
    #[command(subcommand)]
    Ci(CiCommands),

    /// Show version information
    Version,
}

/// Listing commands
#[derive(Subcommand)]
pub enum ListCommands {
    /// All projects served by the metadata service
    Projects,

    /// Versions of a project, newest first
    Versions {
        /// Project id
        project: String,
    },

    /// Builds of a version
    Builds {
        /// Project id
        project: String,

        /// Version id
        version: String,
    },
}

/// CI helper commands
#[derive(Subcommand)]
pub enum CiCommands {
    /// JSON array of the latest build of each of the newest versions
    Matrix {
        /// Project id
        project: String,
    },

    /// The matrix wrapped for a GitHub Actions `strategy.matrix`
    GithubActions {
        /// Project id
        project: String,
    },

    /// Newest version id of a project
    Latest {
        /// Project id
        project: String,
    },
}

impl Cli {
    /// Command-line values that take precedence over file and environment
    pub fn overrides(&self) -> Overrides {
        let destination = match &self.command {
            Commands::Download { destination, .. } => destination.clone(),
            _ => None,
        };

        Overrides {
            base_url: self.global.base_url.clone(),
            timeout: self.global.timeout,
            limit: self.global.limit,
            channel: self.global.channel,
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_download_overrides() {
        let cli = Cli::parse_from([
            "papermc",
            "--limit",
            "3",
            "--channel",
            "stable",
            "download",
            "paper",
            "1.21.4",
            "-d",
            "/srv/server",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.limit, Some(3));
        assert_eq!(overrides.channel, Some(Channel::Stable));
        assert_eq!(overrides.destination, Some(PathBuf::from("/srv/server")));
        assert!(overrides.base_url.is_none());
    }

    #[test]
    fn test_url_alias_and_optional_positionals() {
        let cli = Cli::parse_from(["papermc", "url", "velocity"]);
        match cli.command {
            Commands::GetUrl {
                project,
                version,
                build,
            } => {
                assert_eq!(project, "velocity");
                assert!(version.is_none());
                assert!(build.is_none());
            }
            _ => panic!("expected get-url"),
        }
    }

    #[test]
    fn test_rejects_unknown_channel() {
        assert!(Cli::try_parse_from(["papermc", "--channel", "nightly", "version"]).is_err());
    }
}
