//! Share creation commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tokio::io::AsyncReadExt;

use shortshare_core::error::{AppError, ErrorKind};
use shortshare_core::types::ShareId;
use shortshare_entity::share::PLAIN_TEXT;
use shortshare_service::FileUpload;
use shortshare_service::share::format_size;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for the share command
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,

    /// Stay on the new share and follow its countdown and viewers
    #[arg(short, long, global = true)]
    pub watch: bool,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Share plain text
    Text(TextInput),
    /// Share source code
    Code {
        #[command(flatten)]
        input: TextInput,
        /// Language label (see `shortshare languages`)
        #[arg(short, long, default_value = PLAIN_TEXT)]
        language: String,
    },
    /// Share one or more files
    Files {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

/// Where the text of a text or code share comes from.
#[derive(Debug, Args)]
pub struct TextInput {
    /// Text to share; read from stdin when omitted
    pub content: Option<String>,
    /// Read the text from a file instead
    #[arg(long, conflicts_with = "content")]
    pub from_file: Option<PathBuf>,
}

impl TextInput {
    async fn read(&self) -> Result<String, AppError> {
        if let Some(content) = &self.content {
            return Ok(content.clone());
        }
        if let Some(path) = &self.from_file {
            return tokio::fs::read_to_string(path)
                .await
                .map_err(|e| read_error(path, e));
        }
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to read stdin", e))?;
        Ok(content)
    }
}

/// Execute share commands
pub async fn execute(args: &ShareArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let share_id = match &args.command {
        ShareCommand::Text(input) => {
            let content = input.read().await?;
            ctx.shares.create_text_share(&content, false, None).await?
        }
        ShareCommand::Code { input, language } => {
            let content = input.read().await?;
            ctx.shares
                .create_text_share(&content, true, Some(language.as_str()))
                .await?
        }
        ShareCommand::Files { paths } => {
            let files = read_files(paths).await?;
            let total: u64 = files.iter().map(FileUpload::size).sum();
            if format == OutputFormat::Table {
                println!("Uploading {} file(s), {}...", files.len(), format_size(total));
            }
            ctx.shares.create_file_share(files).await?
        }
    };

    report_created(ctx, &share_id, format).await?;

    if args.watch {
        let share = ctx.shares.get_share(&share_id).await?;
        super::watch::follow(ctx, &share).await?;
    } else if ctx.is_ephemeral() && format == OutputFormat::Table {
        output::print_warning(
            "In-memory backends: this share lives only as long as this process. Use --watch to keep it open.",
        );
    }
    Ok(())
}

async fn report_created(
    ctx: &AppContext,
    share_id: &ShareId,
    format: OutputFormat,
) -> Result<(), AppError> {
    let share = ctx.shares.get_share(share_id).await?;
    let url = ctx.links.share_url(share_id);

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "share_id": share_id,
            "type": share.kind(),
            "url": url,
            "expires_at": share.expires_at,
        })),
        OutputFormat::Table => {
            output::print_success("Share created");
            output::print_kv("Link", &url);
            output::print_kv("Type", share.kind().as_str());
            output::print_kv("Expires in", &ctx.shares.remaining(&share).to_string());
        }
    }
    Ok(())
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<FileUpload>, AppError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("Not a file name: {}", path.display()))
            })?;
        let data = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());
        files.push(FileUpload::new(name, data, mime.as_deref()));
    }
    Ok(files)
}

fn read_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Validation,
        format!("Failed to read {}", path.display()),
        err,
    )
}
