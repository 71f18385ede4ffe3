//! Command-line interface for autotier.
//!
//! # Commands
//!
//! - `generate` - lay out the weapon and armor tierlists of an item snapshot
//! - `validate` - check a configuration against an item snapshot
//! - `init` - write an example `autotier.toml`
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//! - `--config` / `-c`: configuration file (default `autotier.toml`)
//!
//! Logs go to stderr so that `generate` can stream JSON on stdout.

mod generate;
mod init;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::TierlistConfig;
use crate::constants::DEFAULT_CONFIG_FILE;

pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use validate::{ValidateCommand, ValidationResults};

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive (`debug`, `info`, `error`); `None` defers to `RUST_LOG`.
    pub log_level: Option<String>,
    /// Explicit configuration file, if given.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load the configuration file.
    ///
    /// An explicit `--config` path must exist. Without one, `autotier.toml`
    /// in the working directory is used if present, defaults otherwise.
    pub async fn load_tierlist_config(&self) -> Result<TierlistConfig> {
        match &self.config_path {
            Some(path) => TierlistConfig::load_from(path).await,
            None => TierlistConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE)).await,
        }
    }
}

/// Output format shared by `generate` and `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Parser)]
#[command(
    name = "autotier",
    about = "Rank items into tiers and lay out their crafting progression",
    version,
    long_about = "autotier scores weapons and armor from an item snapshot, buckets them into tiers, \
                  and places them on a grid so that crafting chains line up in columns."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate tierlist layouts from an item snapshot
    Generate(GenerateCommand),

    /// Check configuration and overrides against an item snapshot
    Validate(ValidateCommand),

    /// Write an example configuration file
    Init(InitCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Validate(cmd) => cmd.execute(&config).await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}

/// Install the stderr tracing subscriber. `None` reads `RUST_LOG`.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
