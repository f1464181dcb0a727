//! Open a share link.

use clap::Args;

use shortshare_core::error::AppError;
use shortshare_entity::share::{PLAIN_TEXT, ShareContent, TextStats, code_class};
use shortshare_service::LinkService;
use shortshare_service::share::format_size;

use crate::context::AppContext;
use crate::output::{self, AttachmentRow, OutputFormat};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Share link or bare share identifier
    pub link: String,
}

/// Fetch a share, count the view, and print it
pub async fn execute(args: &ShowArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let share_id = LinkService::parse(&args.link)?;
    let mut share = ctx.shares.get_share(&share_id).await?;
    if ctx.shares.record_view(&share).await? {
        share.view_count += 1;
    }

    let mut session = ctx.presence.join(&share_id).await;
    let stats = ctx.shares.stats(&share, session.count());
    session.leave().await;

    let rows: Vec<AttachmentRow> = share
        .attachments()
        .iter()
        .map(|a| AttachmentRow::new(a, ctx.shares.download_url(a)))
        .collect();

    if format == OutputFormat::Json {
        output::print_json(&serde_json::json!({
            "url": ctx.links.share_url(&share_id),
            "share": share,
            "stats": stats,
            "files": rows,
        }));
        return Ok(());
    }

    output::print_kv("Link", &ctx.links.share_url(&share_id));
    output::print_kv("Type", share.kind().as_str());
    output::print_kv("Expires in", &stats.remaining.to_string());
    output::print_kv(
        "Stats",
        &format!(
            "{} viewing, {} views, {} downloads",
            stats.viewers, stats.view_count, stats.download_count
        ),
    );

    match &share.content {
        ShareContent::Text { content } => {
            print_text_stats(&TextStats::of(content));
            println!("\n{content}");
        }
        ShareContent::Code { content, language } => {
            output::print_kv("Language", language.as_deref().unwrap_or(PLAIN_TEXT));
            output::print_kv("Highlight", &code_class(language.as_deref()));
            print_text_stats(&TextStats::of(content));
            println!("\n{content}");
        }
        ShareContent::Files { .. } => {
            output::print_kv(
                "Files",
                &format!("{} ({})", rows.len(), format_size(stats.total_size)),
            );
            println!();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

fn print_text_stats(stats: &TextStats) {
    output::print_kv(
        "Length",
        &format!("{} characters, {} words", stats.characters, stats.words),
    );
}
