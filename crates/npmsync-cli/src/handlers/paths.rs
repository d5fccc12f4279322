//! Paths command handler.
//!
//! Displays the resolved registry and directories for diagnostics.

use anyhow::Result;
use npmsync_core::downloads_root;

use crate::bootstrap::CliContext;

/// Print resolved locations in `key = value` format.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    println!("registry         = {}", config.registry());
    println!("data_dir         = {}", config.data_dir().display());
    println!("downloads        = {}", downloads_root(config.data_dir()).display());
    println!("request_timeout  = {} ms", config.request_timeout().as_millis());
    println!("download_timeout = {} ms", config.download_timeout().as_millis());
    Ok(())
}
