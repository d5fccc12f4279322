#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use ports::{
    NoopObserver, RequestObserver, RequestRecord, StagedTarball, SyncTaskHandle, SyncTaskStatus,
    TracingObserver, UpstreamError, UpstreamRegistryPort, UpstreamReply, UpstreamResult,
};
pub use services::{SyncFollowOptions, SyncFollowOutcome, SyncFollowStop, SyncFollower};

// Re-export path utilities
pub use paths::{DATA_DIR_ENV, PathError, data_root, downloads_root, resolve_data_root};
