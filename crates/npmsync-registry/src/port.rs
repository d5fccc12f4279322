//! Port trait implementation for `NpmRegistry`.
//!
//! Implements the core-owned `UpstreamRegistryPort`, converting envelopes to
//! core DTOs and adapter errors to `UpstreamError`.

use async_trait::async_trait;
use npmsync_core::{
    StagedTarball, SyncTaskHandle, SyncTaskStatus, UpstreamError, UpstreamRegistryPort,
    UpstreamReply, UpstreamResult,
};
use serde::de::DeserializeOwned;

use crate::client::NpmRegistry;
use crate::envelope::ResponseEnvelope;
use crate::error::RegistryError;
use crate::http::HttpTransport;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `RegistryError` to core `UpstreamError`.
fn map_error(err: RegistryError) -> UpstreamError {
    match err {
        RegistryError::Transport(e) if e.is_timeout() => UpstreamError::Timeout {
            url: e.url().map(ToString::to_string).unwrap_or_default(),
        },
        RegistryError::Transport(e) => UpstreamError::Network {
            message: e.to_string(),
        },
        RegistryError::Write(e) => UpstreamError::Io {
            message: e.to_string(),
        },
        err @ RegistryError::Io { .. } => UpstreamError::Io {
            message: err.to_string(),
        },
        RegistryError::InvalidUrl { url, source } => UpstreamError::InvalidUrl {
            url,
            message: source.to_string(),
        },
        RegistryError::Encode(e) => UpstreamError::InvalidRequest {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Convert an envelope to a typed reply, keeping the status verbatim.
fn to_reply<D: DeserializeOwned>(envelope: &ResponseEnvelope) -> UpstreamReply<D> {
    UpstreamReply {
        status: envelope.status,
        url: envelope.url.clone(),
        data: envelope.decode(),
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<T: HttpTransport> UpstreamRegistryPort for NpmRegistry<T> {
    fn registry(&self) -> &str {
        self.config.registry()
    }

    async fn get_full_manifests(
        &self,
        name: &str,
    ) -> UpstreamResult<UpstreamReply<serde_json::Value>> {
        let envelope = Self::get_full_manifests(self, name)
            .await
            .map_err(map_error)?;
        Ok(to_reply(&envelope))
    }

    async fn download_tarball(&self, tarball_url: &str) -> UpstreamResult<StagedTarball> {
        let result = Self::download_tarball(self, tarball_url)
            .await
            .map_err(map_error)?;
        Ok(StagedTarball {
            status: result.envelope.status,
            url: result.envelope.url.clone(),
            bytes_written: result.envelope.bytes_written().unwrap_or_default(),
            path: result.temp_file_path,
        })
    }

    async fn create_sync_task(&self, name: &str) -> UpstreamResult<UpstreamReply<SyncTaskHandle>> {
        let envelope = Self::create_sync_task(self, name)
            .await
            .map_err(map_error)?;
        Ok(to_reply(&envelope))
    }

    async fn get_sync_task(
        &self,
        name: &str,
        task_id: &str,
        offset: u64,
    ) -> UpstreamResult<UpstreamReply<SyncTaskStatus>> {
        let envelope = Self::get_sync_task(self, name, task_id, offset)
            .await
            .map_err(map_error)?;
        Ok(to_reply(&envelope))
    }
}
