//! Public configuration for the registry client.

use std::path::PathBuf;
use std::time::Duration;

/// Default upstream registry.
pub const DEFAULT_SOURCE_REGISTRY: &str = "https://registry.npmjs.com";

/// Default ceiling for ordinary requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default ceiling for tarball downloads.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Configuration for the registry client.
///
/// Read once at construction and never mutated afterwards.
///
/// # Example
///
/// ```
/// use npmsync_registry::NpmRegistryConfig;
/// use std::time::Duration;
///
/// let config = NpmRegistryConfig::new()
///     .with_source_registry("https://registry.npmmirror.com/")
///     .with_data_dir("/var/lib/npmsync")
///     .with_request_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.registry(), "https://registry.npmmirror.com");
/// ```
#[derive(Debug, Clone)]
pub struct NpmRegistryConfig {
    /// Upstream base URL, without trailing slash
    pub(crate) source_registry: String,
    /// Root for staged downloads (`<data_dir>/downloads/...`)
    pub(crate) data_dir: PathBuf,
    /// Timeout for ordinary requests
    pub(crate) request_timeout: Duration,
    /// Timeout for tarball downloads
    pub(crate) download_timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Maximum redirects followed per request
    pub(crate) max_redirects: usize,
}

impl Default for NpmRegistryConfig {
    fn default() -> Self {
        Self {
            source_registry: DEFAULT_SOURCE_REGISTRY.to_string(),
            data_dir: npmsync_core::data_root()
                .unwrap_or_else(|_| std::env::temp_dir().join("npmsync")),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            user_agent: concat!("npmsync/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 10,
        }
    }
}

impl NpmRegistryConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream registry base URL.
    ///
    /// A trailing slash is dropped.
    #[must_use]
    pub fn with_source_registry(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.source_registry = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the data directory that holds `downloads/`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the timeout for ordinary requests.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the timeout for tarball downloads.
    ///
    /// Defaults to 10 minutes.
    #[must_use]
    pub const fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how many redirects a request may follow.
    ///
    /// Defaults to 10.
    #[must_use]
    pub const fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Upstream base URL.
    pub fn registry(&self) -> &str {
        &self.source_registry
    }

    /// Data directory.
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    /// Timeout for ordinary requests.
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Timeout for tarball downloads.
    pub const fn download_timeout(&self) -> Duration {
        self.download_timeout
    }
}
