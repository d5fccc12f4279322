//! Upstream registry port trait.

use super::error::UpstreamResult;
use super::types::{StagedTarball, SyncTaskHandle, SyncTaskStatus, UpstreamReply};
use async_trait::async_trait;

/// Port trait for upstream registry operations.
///
/// # Design
///
/// - Every method performs exactly one round trip; no retry, no polling
/// - Non-2xx responses come back as `UpstreamReply` with the raw status
/// - Sync task ids and offsets are opaque upstream tokens
#[async_trait]
pub trait UpstreamRegistryPort: Send + Sync {
    /// Base URL of the upstream registry.
    fn registry(&self) -> &str;

    /// Fetch the full manifest document for a package.
    async fn get_full_manifests(
        &self,
        name: &str,
    ) -> UpstreamResult<UpstreamReply<serde_json::Value>>;

    /// Stage a tarball into a fresh temporary file.
    ///
    /// On success the caller owns the returned file. On failure no file is
    /// left at the staging path.
    async fn download_tarball(&self, tarball_url: &str) -> UpstreamResult<StagedTarball>;

    /// Ask the upstream to start syncing a package.
    async fn create_sync_task(&self, name: &str) -> UpstreamResult<UpstreamReply<SyncTaskHandle>>;

    /// Fetch the sync log of a task starting at `offset`.
    async fn get_sync_task(
        &self,
        name: &str,
        task_id: &str,
        offset: u64,
    ) -> UpstreamResult<UpstreamReply<SyncTaskStatus>>;
}
