//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use shortshare_core::config::AppConfig;
use shortshare_core::error::AppError;
use shortshare_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration and print a summary
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => println!("{shown:#?}"),
            }
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success("Configuration is valid");
                output::print_kv("Database", &config.database.backend);
                if config.database.backend == "postgres" {
                    output::print_kv("Database URL", &mask_password(&config.database.url));
                }
                output::print_kv("Storage", &config.storage.provider);
                output::print_kv("TTL", &format!("{}s", config.share.ttl_seconds));
                output::print_kv(
                    "Upload limit",
                    &format!("{} bytes", config.share.max_total_upload_bytes),
                );
                output::print_kv("Link origin", &config.share.public_origin);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
