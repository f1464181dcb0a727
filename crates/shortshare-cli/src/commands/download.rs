//! Download the attachments of a files share.

use std::path::PathBuf;

use clap::Args;

use shortshare_core::error::{AppError, ErrorKind};
use shortshare_entity::share::Attachment;
use shortshare_service::LinkService;
use shortshare_service::share::format_size;

use crate::context::AppContext;
use crate::output;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Share link or bare share identifier
    pub link: String,

    /// Directory to write files into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Only download files with these names
    #[arg(short, long)]
    pub name: Vec<String>,
}

/// Execute the download command
pub async fn execute(args: &DownloadArgs, ctx: &AppContext) -> Result<(), AppError> {
    let share_id = LinkService::parse(&args.link)?;
    let share = ctx.shares.get_share(&share_id).await?;

    let attachments = share.attachments();
    if attachments.is_empty() {
        return Err(AppError::validation(format!(
            "Share {share_id} is a {} share and has no files",
            share.kind()
        )));
    }
    let selected = select(attachments, &args.name)?;

    tokio::fs::create_dir_all(&args.output).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create {}", args.output.display()),
            e,
        )
    })?;

    for attachment in selected {
        let data = ctx.shares.download(&share, attachment).await?;
        let path = args.output.join(&attachment.name);
        tokio::fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", path.display()),
                e,
            )
        })?;
        output::print_success(&format!(
            "{} ({}) -> {}",
            attachment.name,
            format_size(attachment.size_bytes()),
            path.display()
        ));
    }
    Ok(())
}

fn select<'a>(attachments: &'a [Attachment], names: &[String]) -> Result<Vec<&'a Attachment>, AppError> {
    if names.is_empty() {
        return Ok(attachments.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            attachments
                .iter()
                .find(|a| &a.name == name)
                .ok_or_else(|| AppError::not_found(format!("No file named {name} in this share")))
        })
        .collect()
}
