//! Sync command handler.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use npmsync_core::{SyncFollowOptions, SyncFollowStop, SyncFollower};

use crate::bootstrap::CliContext;

/// Arguments for the sync command.
#[derive(Debug, Clone)]
pub struct SyncArgs<'a> {
    /// Package name
    pub name: &'a str,
    /// Follow the log after creating the task
    pub wait: bool,
    /// Delay between polls
    pub interval: Duration,
    /// Poll ceiling
    pub max_polls: u32,
}

/// Create a sync task and optionally follow it to completion.
pub async fn execute(ctx: &CliContext, args: SyncArgs<'_>) -> Result<()> {
    let reply = ctx.port.create_sync_task(args.name).await?;

    let task_id = match reply.data {
        Some(handle) if reply.is_success() && handle.ok => handle.log_id,
        _ => bail!("Upstream refused to sync {} (status {})", args.name, reply.status),
    };
    let Some(task_id) = task_id else {
        bail!("Upstream accepted the sync of {} without a task id", args.name);
    };

    println!("Sync task {task_id} created for {}", args.name);
    if !args.wait {
        println!("Follow it with: npmsync log {} {task_id}", args.name);
        return Ok(());
    }

    let follower = SyncFollower::new(
        ctx.port.clone(),
        SyncFollowOptions {
            interval: args.interval,
            max_polls: args.max_polls,
        },
    );
    let mut write_error = None;
    let outcome = follower
        .follow(args.name, &task_id, |slice| {
            forward_log(&mut io::stdout().lock(), slice, &mut write_error)
        })
        .await?;
    if let Some(err) = write_error {
        return Err(err).context("Failed to write the sync log to stdout");
    }

    match outcome.stop {
        SyncFollowStop::Done => {
            println!("Sync of {} finished after {} poll(s)", args.name, outcome.polls);
            Ok(())
        }
        SyncFollowStop::Rejected { status } => {
            bail!("Upstream rejected the log poll with status {status} at offset {}", outcome.offset)
        }
        SyncFollowStop::Stopped => Ok(()),
        SyncFollowStop::PollLimit => bail!(
            "Gave up after {} poll(s); resume with: npmsync log {} {task_id} --offset {}",
            outcome.polls,
            args.name,
            outcome.offset
        ),
    }
}

/// Write one log slice; a write error is kept and stops following.
fn forward_log(out: &mut impl Write, slice: &str, error: &mut Option<io::Error>) -> ControlFlow<()> {
    match out.write_all(slice.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => {
            *error = Some(e);
            ControlFlow::Break(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_forward_log_writes_slice() {
        let mut out = Vec::new();
        let mut error = None;

        let flow = forward_log(&mut out, "[sync] fetching\n", &mut error);

        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(out, b"[sync] fetching\n");
        assert!(error.is_none());
    }

    #[test]
    fn test_forward_log_stops_on_write_error() {
        let mut error = None;

        let flow = forward_log(&mut ClosedPipe, "[sync] fetching\n", &mut error);

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(error.map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    }
}
