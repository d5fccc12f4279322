//! Manifest command handler.

use anyhow::{Result, bail};
use npmsync_registry::ResponseBody;

use crate::bootstrap::CliContext;

/// Fetch and print the full manifest of `name`.
pub async fn execute(ctx: &CliContext, name: &str) -> Result<()> {
    let envelope = ctx.client.get_full_manifests(name).await?;

    if !envelope.is_success() {
        bail!(
            "Upstream answered {} for {} ({} ms)",
            envelope.status,
            envelope.url,
            envelope.elapsed.as_millis()
        );
    }

    match &envelope.body {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ResponseBody::Text(text) => println!("{text}"),
        ResponseBody::Streamed { bytes_written } => println!("{bytes_written} bytes streamed"),
    }
    Ok(())
}
