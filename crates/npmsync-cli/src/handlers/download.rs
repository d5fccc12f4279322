//! Download command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Stage a tarball and print where it landed.
///
/// A non-2xx download is kept on disk; the status is printed so the operator
/// can inspect the body.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let staged = ctx
        .port
        .download_tarball(url)
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    println!("status = {}", staged.status);
    println!("bytes  = {}", staged.bytes_written);
    println!("path   = {}", staged.path.display());
    Ok(())
}
