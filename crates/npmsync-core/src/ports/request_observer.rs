//! Observer port for completed upstream requests.
//!
//! Every call that reaches the upstream registry produces exactly one
//! `RequestRecord`. Where that record goes (log lines, metrics, a test
//! recorder) is decided by the composition root.

use std::time::Duration;

/// Record describing one completed upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    /// HTTP method, upper case
    pub method: String,
    /// The URL as requested (before redirects)
    pub url: String,
    /// Final HTTP status returned by the upstream
    pub status: u16,
    /// Wall time from send until the body was fully consumed
    pub elapsed: Duration,
}

/// Sink for request completion records.
///
/// # Implementations
///
/// - `TracingObserver` - writes an `info` event per request (default)
/// - `NoopObserver` - discards records
pub trait RequestObserver: Send + Sync {
    /// Called once per completed request. Must not block.
    fn on_request_complete(&self, record: &RequestRecord);
}

/// Observer that emits each record as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Create a new tracing observer.
    pub const fn new() -> Self {
        Self
    }
}

impl RequestObserver for TracingObserver {
    fn on_request_complete(&self, record: &RequestRecord) {
        tracing::info!(
            method = %record.method,
            url = %record.url,
            status = record.status,
            elapsed_ms = u64::try_from(record.elapsed.as_millis()).unwrap_or(u64::MAX),
            "[NpmRegistry:request] {} {}, status: {}",
            record.method,
            record.url,
            record.status
        );
    }
}

/// Observer that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NoopObserver {
    /// Create a new no-op observer.
    pub const fn new() -> Self {
        Self
    }
}

impl RequestObserver for NoopObserver {
    fn on_request_complete(&self, _record: &RequestRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record() -> RequestRecord {
        RequestRecord {
            method: "GET".to_string(),
            url: "https://registry.example/left-pad".to_string(),
            status: 200,
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_observers_accept_records() {
        TracingObserver::new().on_request_complete(&record());
        NoopObserver::new().on_request_complete(&record());
    }

    #[test]
    fn test_arc_observer() {
        let observer: Arc<dyn RequestObserver> = Arc::new(TracingObserver::new());
        observer.on_request_complete(&record());
    }
}
