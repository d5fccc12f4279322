//! Root CLI parser and global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the upstream registry client.
#[derive(Parser, Debug)]
#[command(name = "npmsync")]
#[command(about = "Talk to an upstream npm registry: manifests, tarballs, sync tasks")]
#[command(version)]
pub struct Cli {
    /// Upstream registry base URL
    #[arg(long, global = true, env = "NPMSYNC_SOURCE_REGISTRY")]
    pub registry: Option<String>,

    /// Data directory; staged tarballs go under `<data-dir>/downloads`
    #[arg(long = "data-dir", global = true, env = "NPMSYNC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Timeout for regular requests, in milliseconds
    #[arg(long = "timeout-ms", global = true, env = "NPMSYNC_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Timeout for tarball downloads, in milliseconds
    #[arg(
        long = "download-timeout-ms",
        global = true,
        env = "NPMSYNC_DOWNLOAD_TIMEOUT_MS"
    )]
    pub download_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
