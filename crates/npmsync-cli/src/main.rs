//! CLI entry point - the composition root.

use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use npmsync_cli::handlers::sync::SyncArgs;
use npmsync_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(&CliConfig::from_cli(&cli))?;

    match command {
        Commands::Manifest { name } => handlers::manifest::execute(&ctx, name).await?,
        Commands::Download { url } => handlers::download::execute(&ctx, url).await?,
        Commands::Sync {
            name,
            wait,
            interval_ms,
            max_polls,
        } => {
            let args = SyncArgs {
                name,
                wait: *wait,
                interval: Duration::from_millis(*interval_ms),
                max_polls: *max_polls,
            };
            handlers::sync::execute(&ctx, args).await?;
        }
        Commands::Log { name, id, offset } => {
            handlers::log::execute(&ctx, name, id, *offset).await?;
        }
        Commands::Paths => handlers::paths::execute(&ctx)?,
    }

    Ok(())
}
