//! Upstream registry port definitions.
//!
//! This module defines the port trait and DTOs for talking to the upstream
//! source registry. The implementation lives in `npmsync-registry`.

mod client;
mod error;
mod types;

pub use client::UpstreamRegistryPort;
pub use error::{UpstreamError, UpstreamResult};
pub use types::{StagedTarball, SyncTaskHandle, SyncTaskStatus, UpstreamReply};
