//! Upstream sync task calls.
//!
//! One round trip per call. Polling until `syncDone` is the caller's job
//! (see `npmsync_core::SyncFollower`).

use reqwest::Method;

use crate::envelope::{RequestOptions, ResponseEnvelope};
use crate::error::RegistryResult;
use crate::http::HttpTransport;
use crate::url::{build_sync_create_url, build_sync_log_url};

use super::NpmRegistry;

impl<T: HttpTransport> NpmRegistry<T> {
    /// Ask the upstream to sync `name`.
    ///
    /// The upstream answers `{ ok, logId }`. Repeated calls may start
    /// duplicate tasks; avoiding that is up to the caller.
    pub async fn create_sync_task(&self, name: &str) -> RegistryResult<ResponseEnvelope> {
        let url = build_sync_create_url(&self.config, name);
        self.request(Method::PUT, &url, None, RequestOptions::new())
            .await
    }

    /// Read the log of sync task `task_id` from `offset`.
    ///
    /// The upstream answers `{ ok, syncDone, log }`.
    pub async fn get_sync_task(
        &self,
        name: &str,
        task_id: &str,
        offset: u64,
    ) -> RegistryResult<ResponseEnvelope> {
        let url = build_sync_log_url(&self.config, name, task_id, offset);
        self.request(Method::GET, &url, None, RequestOptions::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::client_with;
    use crate::http::testing::{FakeReply, FakeTransport};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_sync_task_request() {
        let upstream = json!({"ok": true, "logId": "job-123"});
        let client = client_with(FakeTransport::new().with_reply(FakeReply::json(201, &upstream)));

        let envelope = client.create_sync_task("left-pad").await.unwrap();

        let sent = client.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::PUT);
        assert_eq!(
            sent[0].url.as_str(),
            "https://registry.example/left-pad/sync?sync_upstream=true&nodeps=true"
        );
        assert_eq!(envelope.json(), Some(&upstream));
        assert_eq!(envelope.method, Method::PUT);
    }

    #[tokio::test]
    async fn test_get_sync_task_request() {
        let upstream = json!({"ok": true, "syncDone": false, "log": "[2024] syncing"});
        let client = client_with(FakeTransport::new().with_reply(FakeReply::json(200, &upstream)));

        let envelope = client.get_sync_task("left-pad", "job-123", 42).await.unwrap();

        let sent = client.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(
            sent[0].url.as_str(),
            "https://registry.example/left-pad/sync/log/job-123?offset=42"
        );
        assert_eq!(envelope.json(), Some(&upstream));
    }

    #[tokio::test]
    async fn test_sync_rejection_is_data() {
        let upstream = json!({"ok": false, "error": "forbidden"});
        let client = client_with(FakeTransport::new().with_reply(FakeReply::json(403, &upstream)));

        let envelope = client.create_sync_task("@private/pkg").await.unwrap();

        assert_eq!(envelope.status, 403);
        assert_eq!(
            client.transport.requests()[0].url.path(),
            "/%40private%2Fpkg/sync"
        );
    }
}
