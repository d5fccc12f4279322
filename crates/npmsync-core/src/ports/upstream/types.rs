//! Core-owned DTOs for upstream registry operations.
//!
//! Field names on the wire follow the upstream registry's JSON
//! (`logId`, `syncDone`).

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Reply to a single upstream call, carrying the raw status verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply<T> {
    /// HTTP status returned by the upstream
    pub status: u16,
    /// URL that was requested
    pub url: String,
    /// Decoded body, `None` when the body did not match `T`
    pub data: Option<T>,
}

impl<T> UpstreamReply<T> {
    /// Whether the upstream answered with a 2xx status.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A tarball staged into a temporary file.
///
/// The file at `path` belongs to the caller, who moves, persists or deletes
/// it. Anything left behind is removed by the external downloads sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedTarball {
    /// HTTP status returned by the upstream
    pub status: u16,
    /// URL that was requested
    pub url: String,
    /// Temporary file holding the response body
    pub path: PathBuf,
    /// Number of body bytes written to `path`
    pub bytes_written: u64,
}

/// Handle returned when a sync task is created upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTaskHandle {
    /// Upstream acknowledgement flag
    #[serde(default)]
    pub ok: bool,
    /// Opaque task identifier
    #[serde(
        rename = "logId",
        default,
        deserialize_with = "opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub log_id: Option<String>,
}

/// Progress of a sync task, as returned by a single log poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTaskStatus {
    /// Upstream acknowledgement flag
    #[serde(default)]
    pub ok: bool,
    /// Whether the task has finished
    #[serde(rename = "syncDone", default)]
    pub sync_done: bool,
    /// Log output produced since the requested offset
    #[serde(default)]
    pub log: Option<String>,
}

impl SyncTaskStatus {
    /// Log slice, empty when the upstream sent none.
    pub fn log_slice(&self) -> &str {
        self.log.as_deref().unwrap_or_default()
    }
}

/// Accept task ids sent either as strings or as numbers.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}
