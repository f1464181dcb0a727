//! Database migration management commands.

use clap::{Args, Subcommand};

use shortshare_core::config::AppConfig;
use shortshare_core::error::AppError;
use shortshare_database::DatabasePool;
use shortshare_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show whether the share schema is in place
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend != "postgres" {
        output::print_warning(&format!(
            "Database backend is '{}'; nothing to migrate.",
            config.database.backend
        ));
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;
    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            if pool.shares_table_ready().await? {
                output::print_success("Share schema is in place.");
            } else {
                output::print_warning("Share schema missing; run `shortshare migrate run`.");
            }
        }
    }
    pool.close().await;

    Ok(())
}
