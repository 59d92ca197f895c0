//! Command-line interface for assetgraph.
//!
//! Each command lives in its own module with its own argument struct and
//! `execute` method. Output meant for machines goes to stdout; logs and
//! errors go to stderr.
//!
//! # Available Commands
//!
//! - `create` - Resolve an asset (and everything it depends on) and print it
//! - `graph` - Show the declared dependency tree of an asset without generating it
//! - `infra-id` - Derive an infra ID directly from a cluster name
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a custom settings file
//!
//! # Example
//!
//! ```bash
//! # Derive the cluster identity from ./install-config.yaml
//! assetgraph create cluster-id
//!
//! # Same, from an explicit file, as YAML
//! assetgraph create cluster-id --install-config prod/install-config.yaml --format yaml
//!
//! # Inspect the graph
//! assetgraph graph cluster-id
//! assetgraph graph --order
//!
//! # Try the naming rules for a platform
//! assetgraph infra-id "My Cluster" --platform gcp
//! ```

mod create;
mod graph;
mod infra_id;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::asset::{DynAsset, dependency};
use crate::config::Settings;
use crate::installconfig::{ClusterId, InstallConfigAsset};

pub use create::CreateCommand;
pub use graph::GraphCommand;
pub use infra_id::InfraIdCommand;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and programmatic callers can choose
/// a log level and settings file without going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive requested on the command line.
    ///
    /// `None` means neither `--verbose` nor `--quiet` was given, so the
    /// settings file (or the built-in `warn`) decides.
    pub log_level: Option<String>,

    /// Custom settings file location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log filter directive to use when `RUST_LOG` is not set.
    ///
    /// Command-line flags win over the settings file, which wins over `warn`.
    pub fn log_directive(&self, settings: &Settings) -> String {
        self.log_level
            .clone()
            .or_else(|| settings.log_level.clone())
            .unwrap_or_else(|| "warn".to_string())
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over everything else. Calling this more
    /// than once is harmless; only the first call installs a subscriber.
    pub fn init_logging(&self, settings: &Settings) {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            let directive = self.log_directive(settings);
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve install-config derived assets and inspect their dependency graph.
#[derive(Parser, Debug)]
#[command(
    name = "assetgraph",
    about = "Resolve cluster install assets and their dependencies",
    version,
    long_about = "assetgraph resolves a graph of install assets (install config, cluster identity) \
                  from an install-config.yaml, generating each asset at most once."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom settings file.
    ///
    /// Overrides `~/.assetgraph/config.toml`. Can also be set with the
    /// `ASSETGRAPH_CONFIG` environment variable.
    #[arg(short, long, global = true, env = "ASSETGRAPH_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an asset and print its value.
    ///
    /// See [`CreateCommand`] for options.
    Create(CreateCommand),

    /// Print the dependency tree of an asset.
    ///
    /// See [`GraphCommand`] for options.
    Graph(GraphCommand),

    /// Derive an infra ID from a cluster name.
    ///
    /// See [`InfraIdCommand`] for options.
    InfraId(InfraIdCommand),
}

/// Assets that can be named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// The parsed `install-config.yaml`.
    InstallConfig,
    /// The cluster identity (`uuid` and `infraID`).
    ClusterId,
}

impl Target {
    /// The asset this target names.
    pub fn asset(self) -> Box<dyn DynAsset> {
        match self {
            Self::InstallConfig => dependency(InstallConfigAsset),
            Self::ClusterId => dependency(ClusterId),
        }
    }
}

impl Cli {
    /// Execute the command with configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns whatever the subcommand returns; `main` turns it into a
    /// user-facing message.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is unreadable or the
    /// subcommand fails.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let settings = Settings::load_with_optional(config.config_path.clone()).await?;
        config.init_logging(&settings);
        debug!("running with settings {settings:?}");

        match self.command {
            Commands::Create(cmd) => cmd.execute_with_settings(&settings).await,
            Commands::Graph(cmd) => cmd.execute(),
            Commands::InfraId(cmd) => cmd.execute(),
        }
    }
}
