//! Follow an upstream sync task until it reports completion.
//!
//! The registry port performs one round trip per call. This service is the
//! consumer loop around it: poll, hand over new log output, advance the
//! offset, repeat until `syncDone`.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::ports::{UpstreamRegistryPort, UpstreamResult};

/// Polling knobs for [`SyncFollower`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncFollowOptions {
    /// Delay before each poll
    pub interval: Duration,
    /// Upper bound on the number of polls
    pub max_polls: u32,
}

impl Default for SyncFollowOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_polls: 180,
        }
    }
}

/// Why following stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncFollowStop {
    /// Upstream reported `syncDone: true`.
    Done,
    /// Upstream answered with a non-2xx status, an undecodable body, or `ok: false`.
    Rejected {
        /// Status of the rejecting reply
        status: u16,
    },
    /// `max_polls` was reached before the task finished.
    PollLimit,
    /// The log consumer asked to stop.
    Stopped,
}

/// Summary of a follow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFollowOutcome {
    /// Stop reason
    pub stop: SyncFollowStop,
    /// Number of polls issued
    pub polls: u32,
    /// Offset after the last consumed log slice
    pub offset: u64,
}

impl SyncFollowOutcome {
    /// Whether the task finished upstream.
    pub fn is_done(&self) -> bool {
        self.stop == SyncFollowStop::Done
    }
}

/// Polls a sync task's log through an [`UpstreamRegistryPort`].
pub struct SyncFollower {
    port: Arc<dyn UpstreamRegistryPort>,
    options: SyncFollowOptions,
}

impl SyncFollower {
    /// Create a follower over the given port.
    pub fn new(port: Arc<dyn UpstreamRegistryPort>, options: SyncFollowOptions) -> Self {
        Self { port, options }
    }

    /// Follow `task_id` from offset 0.
    ///
    /// `on_log` receives every non-empty log slice in order and returns
    /// `ControlFlow::Break` to stop following. Transport errors propagate;
    /// upstream rejections end the run normally.
    pub async fn follow<F>(&self, name: &str, task_id: &str, on_log: F) -> UpstreamResult<SyncFollowOutcome>
    where
        F: FnMut(&str) -> ControlFlow<()> + Send,
    {
        self.follow_from(name, task_id, 0, on_log).await
    }

    /// Follow `task_id` starting at a known offset.
    ///
    /// A slice rejected by `on_log` is not counted in the returned offset,
    /// so resuming from it hands the same slice over again.
    pub async fn follow_from<F>(
        &self,
        name: &str,
        task_id: &str,
        mut offset: u64,
        mut on_log: F,
    ) -> UpstreamResult<SyncFollowOutcome>
    where
        F: FnMut(&str) -> ControlFlow<()> + Send,
    {
        let mut polls = 0;

        while polls < self.options.max_polls {
            if !self.options.interval.is_zero() {
                tokio::time::sleep(self.options.interval).await;
            }
            polls += 1;

            let reply = self.port.get_sync_task(name, task_id, offset).await?;
            let status = match reply.data {
                Some(status) if reply.is_success() && status.ok => status,
                _ => {
                    debug!(
                        name,
                        task_id,
                        status = reply.status,
                        "Sync log poll rejected by upstream"
                    );
                    return Ok(SyncFollowOutcome {
                        stop: SyncFollowStop::Rejected {
                            status: reply.status,
                        },
                        polls,
                        offset,
                    });
                }
            };

            let log = status.log_slice();
            if !log.is_empty() {
                if on_log(log).is_break() {
                    return Ok(SyncFollowOutcome {
                        stop: SyncFollowStop::Stopped,
                        polls,
                        offset,
                    });
                }
                offset += log.chars().count() as u64;
            }

            if status.sync_done {
                return Ok(SyncFollowOutcome {
                    stop: SyncFollowStop::Done,
                    polls,
                    offset,
                });
            }
        }

        Ok(SyncFollowOutcome {
            stop: SyncFollowStop::PollLimit,
            polls,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        StagedTarball, SyncTaskHandle, SyncTaskStatus, UpstreamError, UpstreamReply,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Port that replays scripted sync log replies and records offsets.
    struct ScriptedPort {
        replies: Mutex<VecDeque<UpstreamResult<UpstreamReply<SyncTaskStatus>>>>,
        offsets: Mutex<Vec<u64>>,
    }

    impl ScriptedPort {
        fn new(replies: Vec<UpstreamResult<UpstreamReply<SyncTaskStatus>>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                offsets: Mutex::new(Vec::new()),
            })
        }

        fn offsets(&self) -> Vec<u64> {
            self.offsets.lock().unwrap().clone()
        }
    }

    fn reply(status: u16, ok: bool, done: bool, log: &str) -> UpstreamResult<UpstreamReply<SyncTaskStatus>> {
        Ok(UpstreamReply {
            status,
            url: "https://registry.example/left-pad/sync/log/job-1".to_string(),
            data: Some(SyncTaskStatus {
                ok,
                sync_done: done,
                log: Some(log.to_string()),
            }),
        })
    }

    #[async_trait]
    impl UpstreamRegistryPort for ScriptedPort {
        fn registry(&self) -> &str {
            "https://registry.example"
        }

        async fn get_full_manifests(
            &self,
            _name: &str,
        ) -> UpstreamResult<UpstreamReply<serde_json::Value>> {
            unimplemented!("not used by the follower")
        }

        async fn download_tarball(&self, _tarball_url: &str) -> UpstreamResult<StagedTarball> {
            unimplemented!("not used by the follower")
        }

        async fn create_sync_task(
            &self,
            _name: &str,
        ) -> UpstreamResult<UpstreamReply<SyncTaskHandle>> {
            unimplemented!("not used by the follower")
        }

        async fn get_sync_task(
            &self,
            _name: &str,
            _task_id: &str,
            offset: u64,
        ) -> UpstreamResult<UpstreamReply<SyncTaskStatus>> {
            self.offsets.lock().unwrap().push(offset);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("more polls than scripted replies")
        }
    }

    fn options(max_polls: u32) -> SyncFollowOptions {
        SyncFollowOptions {
            interval: Duration::ZERO,
            max_polls,
        }
    }

    #[tokio::test]
    async fn test_follows_until_done_advancing_offset() {
        let port = ScriptedPort::new(vec![
            reply(200, true, false, "start\n"),
            reply(200, true, false, ""),
            reply(200, true, true, "done"),
        ]);
        let follower = SyncFollower::new(port.clone(), options(10));

        let mut seen = Vec::new();
        let outcome = follower
            .follow("left-pad", "job-1", |log| {
                seen.push(log.to_string());
                ControlFlow::Continue(())
            })
            .await
            .unwrap();

        assert!(outcome.is_done());
        assert_eq!(outcome.polls, 3);
        assert_eq!(outcome.offset, 10);
        assert_eq!(port.offsets(), vec![0, 6, 6]);
        assert_eq!(seen, vec!["start\n".to_string(), "done".to_string()]);
    }

    #[tokio::test]
    async fn test_offset_counts_characters() {
        let port = ScriptedPort::new(vec![reply(200, true, false, "✓ ok"), reply(200, true, true, "")]);
        let follower = SyncFollower::new(port.clone(), options(5));

        let outcome = follower.follow("left-pad", "job-1", |_| ControlFlow::Continue(())).await.unwrap();

        assert_eq!(port.offsets(), vec![0, 4]);
        assert_eq!(outcome.offset, 4);
    }

    #[tokio::test]
    async fn test_stops_at_poll_limit() {
        let port = ScriptedPort::new(vec![
            reply(200, true, false, "a"),
            reply(200, true, false, "b"),
        ]);
        let follower = SyncFollower::new(port, options(2));

        let outcome = follower.follow("left-pad", "job-1", |_| ControlFlow::Continue(())).await.unwrap();

        assert_eq!(outcome.stop, SyncFollowStop::PollLimit);
        assert_eq!(outcome.polls, 2);
        assert_eq!(outcome.offset, 2);
    }

    #[tokio::test]
    async fn test_non_success_status_rejects() {
        let port = ScriptedPort::new(vec![reply(404, false, false, "")]);
        let follower = SyncFollower::new(port, options(5));

        let outcome = follower.follow("left-pad", "job-1", |_| ControlFlow::Continue(())).await.unwrap();

        assert_eq!(outcome.stop, SyncFollowStop::Rejected { status: 404 });
        assert_eq!(outcome.polls, 1);
    }

    #[tokio::test]
    async fn test_not_ok_rejects() {
        let port = ScriptedPort::new(vec![reply(200, false, false, "ignored")]);
        let follower = SyncFollower::new(port, options(5));

        let mut called = false;
        let outcome = follower
            .follow("left-pad", "job-1", |_| {
                called = true;
                ControlFlow::Continue(())
            })
            .await
            .unwrap();

        assert_eq!(outcome.stop, SyncFollowStop::Rejected { status: 200 });
        assert!(!called);
    }

    #[tokio::test]
    async fn test_resumes_from_offset() {
        let port = ScriptedPort::new(vec![reply(200, true, true, "tail")]);
        let follower = SyncFollower::new(port.clone(), options(5));

        let outcome = follower
            .follow_from("left-pad", "job-1", 42, |_| ControlFlow::Continue(()))
            .await
            .unwrap();

        assert_eq!(port.offsets(), vec![42]);
        assert_eq!(outcome.offset, 46);
    }

    #[tokio::test]
    async fn test_consumer_can_stop_following() {
        let port = ScriptedPort::new(vec![
            reply(200, true, false, "first\n"),
            reply(200, true, false, "second\n"),
            reply(200, true, true, "never polled"),
        ]);
        let follower = SyncFollower::new(port.clone(), options(10));

        let mut seen = 0;
        let outcome = follower
            .follow("left-pad", "job-1", |_| {
                seen += 1;
                if seen == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome.stop, SyncFollowStop::Stopped);
        assert_eq!(outcome.polls, 2);
        assert_eq!(outcome.offset, 6);
        assert_eq!(port.offsets(), vec![0, 6]);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let port = ScriptedPort::new(vec![Err(UpstreamError::Timeout {
            url: "https://registry.example".to_string(),
        })]);
        let follower = SyncFollower::new(port, options(5));

        let result = follower.follow("left-pad", "job-1", |_| ControlFlow::Continue(())).await;

        assert!(matches!(result, Err(UpstreamError::Timeout { .. })));
    }
}
