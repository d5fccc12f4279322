//! CLI bootstrap - the composition root.
//!
//! The only place where the registry client is wired together. Handlers
//! receive a [`CliContext`] and never build clients themselves.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use npmsync_core::UpstreamRegistryPort;
use npmsync_core::paths::resolve_data_root;
use npmsync_registry::{DefaultNpmRegistry, NpmRegistryConfig};

use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Upstream registry override
    pub registry: Option<String>,
    /// Data directory override
    pub data_dir: Option<PathBuf>,
    /// Request timeout override
    pub request_timeout: Option<Duration>,
    /// Download timeout override
    pub download_timeout: Option<Duration>,
}

impl CliConfig {
    /// Collect overrides from parsed flags and environment.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            registry: cli.registry.clone(),
            data_dir: cli.data_dir.clone(),
            request_timeout: cli.timeout_ms.map(Duration::from_millis),
            download_timeout: cli.download_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Build the registry configuration, applying overrides over defaults.
    pub fn registry_config(&self) -> Result<NpmRegistryConfig> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => resolve_data_root(None).context("Failed to resolve the data directory")?,
        };

        let mut config = NpmRegistryConfig::new().with_data_dir(data_dir);
        if let Some(registry) = &self.registry {
            config = config.with_source_registry(registry.as_str());
        }
        if let Some(timeout) = self.request_timeout {
            config = config.with_request_timeout(timeout);
        }
        if let Some(timeout) = self.download_timeout {
            config = config.with_download_timeout(timeout);
        }
        Ok(config)
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Concrete client, for commands that print full envelopes
    pub client: Arc<DefaultNpmRegistry>,
    /// The same client behind the core port
    pub port: Arc<dyn UpstreamRegistryPort>,
}

impl CliContext {
    /// Active registry configuration.
    pub fn config(&self) -> &NpmRegistryConfig {
        self.client.config()
    }
}

/// Wire config, transport and observer into a [`CliContext`].
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let registry_config = config.registry_config()?;
    let client = Arc::new(
        DefaultNpmRegistry::new(registry_config).context("Failed to build the HTTP client")?,
    );
    let port: Arc<dyn UpstreamRegistryPort> = client.clone();
    Ok(CliContext { client, port })
}
