use anyhow::Context;
use clap::Parser;
use dragnet::cli::Args;
use dragnet::scan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config = Args::parse()
        .into_config()
        .context("invalid arguments")?;

    scan::run(&config).await.context("pipeline failed")?;

    Ok(())
}
