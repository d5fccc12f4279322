//! Manifest fetch.

use reqwest::Method;

use crate::envelope::{RequestOptions, ResponseEnvelope};
use crate::error::RegistryResult;
use crate::http::HttpTransport;
use crate::url::build_manifest_url;

use super::NpmRegistry;

impl<T: HttpTransport> NpmRegistry<T> {
    /// Fetch the full manifest of `name` from the upstream.
    ///
    /// The document is returned as-is; nothing here interprets it.
    pub async fn get_full_manifests(&self, name: &str) -> RegistryResult<ResponseEnvelope> {
        let url = build_manifest_url(&self.config, name);
        self.request(Method::GET, &url, None, RequestOptions::new())
            .await
    }
}
