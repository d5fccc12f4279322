//! Subcommands of the `npmsync` CLI.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the full manifest document of a package
    Manifest {
        /// Package name, scoped names included (e.g. "@babel/core")
        name: String,
    },

    /// Stage a tarball into the downloads directory
    Download {
        /// Absolute tarball URL
        url: String,
    },

    /// Ask the upstream registry to sync a package
    Sync {
        /// Package name
        name: String,
        /// Follow the task log until the upstream reports completion
        #[arg(long)]
        wait: bool,
        /// Delay between log polls, in milliseconds
        #[arg(long = "interval-ms", default_value_t = 1000)]
        interval_ms: u64,
        /// Maximum number of log polls
        #[arg(long = "max-polls", default_value_t = 180)]
        max_polls: u32,
    },

    /// Print one slice of a sync task's log
    Log {
        /// Package name
        name: String,
        /// Task id returned by `sync`
        id: String,
        /// Character offset into the log
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Show the resolved registry and directories
    Paths,
}
