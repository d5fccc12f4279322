//! Log command handler.

use anyhow::{Result, bail};
use tracing::debug;

use crate::bootstrap::CliContext;

/// Print one slice of a sync task's log.
///
/// The log text goes to stdout; the next offset goes to stderr so the slice
/// can be piped on its own.
pub async fn execute(ctx: &CliContext, name: &str, task_id: &str, offset: u64) -> Result<()> {
    let reply = ctx.port.get_sync_task(name, task_id, offset).await?;
    debug!(name, task_id, offset, status = reply.status, "Fetched sync log slice");

    if !reply.is_success() {
        bail!("Upstream answered {} for {}", reply.status, reply.url);
    }
    let Some(status) = reply.data else {
        bail!("Upstream sent an unreadable sync log from {}", reply.url);
    };

    let slice = status.log_slice();
    print!("{slice}");
    let next = offset + slice.chars().count() as u64;
    eprintln!(
        "ok = {}, syncDone = {}, next offset = {next}",
        status.ok, status.sync_done
    );
    Ok(())
}
