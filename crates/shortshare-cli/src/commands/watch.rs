//! Follow a share's countdown and live viewer count.

use std::io::Write;

use clap::Args;

use shortshare_core::error::{AppError, ErrorKind};
use shortshare_entity::share::Share;
use shortshare_service::{LinkService, Remaining};

use crate::context::AppContext;

/// Arguments for the watch command
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Share link or bare share identifier
    pub link: String,
}

/// Open a share and follow it until it expires or Ctrl-C
pub async fn execute(args: &WatchArgs, ctx: &AppContext) -> Result<(), AppError> {
    let share_id = LinkService::parse(&args.link)?;
    let share = ctx.shares.get_share(&share_id).await?;
    ctx.shares.record_view(&share).await?;
    follow(ctx, &share).await
}

/// Print the countdown and viewer count on one line until the share expires
/// or the user interrupts.
pub async fn follow(ctx: &AppContext, share: &Share) -> Result<(), AppError> {
    let countdown = ctx.shares.countdown(share);
    let mut session = ctx.presence.join(&share.share_id).await;
    if session.is_degraded() {
        tracing::warn!(share_id = %share.share_id, "Live viewer count unavailable");
    }

    let mut remaining = countdown.subscribe();
    let mut viewers = session.counts();
    let mut viewers_open = true;

    println!("Watching {} (Ctrl-C to stop)", ctx.links.share_url(&share.share_id));
    loop {
        let now = *remaining.borrow_and_update();
        if let Err(e) = render_status(&mut std::io::stdout(), now, session.count()) {
            session.leave().await;
            return Err(e);
        }
        if now.is_expired() {
            break;
        }

        tokio::select! {
            changed = remaining.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = viewers.changed(), if viewers_open => {
                viewers_open = changed.is_ok();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    println!();

    session.leave().await;
    Ok(())
}

/// Redraw the status line in place.
fn render_status(
    out: &mut impl Write,
    remaining: Remaining,
    viewers: usize,
) -> Result<(), AppError> {
    write!(out, "\r⏳ {remaining}   🟢 {viewers} viewing   ")
        .and_then(|()| out.flush())
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to write status line", e))
}
