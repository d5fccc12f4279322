//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `url` types in any signature
//! - Upstream protocol outcomes (non-2xx, `ok: false`) are data, not errors
//! - Only transport and staging failures surface as `UpstreamError`

pub mod request_observer;
pub mod upstream;

pub use request_observer::{NoopObserver, RequestObserver, RequestRecord, TracingObserver};
pub use upstream::{
    StagedTarball, SyncTaskHandle, SyncTaskStatus, UpstreamError, UpstreamRegistryPort,
    UpstreamReply, UpstreamResult,
};
