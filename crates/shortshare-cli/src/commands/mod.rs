//! CLI command definitions and dispatch.

pub mod config;
pub mod download;
pub mod languages;
pub mod migrate;
pub mod share;
pub mod show;
pub mod watch;

use clap::{Parser, Subcommand};

use shortshare_core::config::AppConfig;
use shortshare_core::error::AppError;

use crate::context::AppContext;
use crate::output::OutputFormat;

/// ShortShare: share files, text, and code through links that expire after two hours
#[derive(Debug, Parser)]
#[command(name = "shortshare", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from config/<env>.toml
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a text, code, or files share
    Share(share::ShareArgs),
    /// Open a share link
    Show(show::ShowArgs),
    /// Download the files of a share
    Download(download::DownloadArgs),
    /// Follow a share's countdown and live viewers
    Watch(watch::WatchArgs),
    /// List language labels for code shares
    Languages,
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load the configuration selected by `--config` and `--env`.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config, &self.env)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Languages => {
                languages::execute(self.format);
                Ok(())
            }
            Commands::Config(args) => config::execute(args, &config, self.format),
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Share(args) => {
                let ctx = AppContext::build(config).await?;
                share::execute(args, &ctx, self.format).await
            }
            Commands::Show(args) => {
                let ctx = AppContext::build(config).await?;
                show::execute(args, &ctx, self.format).await
            }
            Commands::Download(args) => {
                let ctx = AppContext::build(config).await?;
                download::execute(args, &ctx).await
            }
            Commands::Watch(args) => {
                let ctx = AppContext::build(config).await?;
                watch::execute(args, &ctx).await
            }
        }
    }
}
