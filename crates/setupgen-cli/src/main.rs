//! Setup script generator
//!
//! Compiles the EKS optimized Windows AMI ImageBuilder component into
//! `scripts/setup.ps1`.

use anyhow::Result;
use clap::Parser;
use setupgen_cli::{Cli, Generator, GeneratorConfig};
use setupgen_compiler::LOG_TARGET;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing
    init_tracing(args.log_filter())?;

    // Load configuration
    let mut config = match &args.config {
        Some(file) => GeneratorConfig::load_from(file)?,
        None => GeneratorConfig::load()?,
    };
    config.apply_args(&args);
    tracing::debug!(target: LOG_TARGET, "Loaded configuration: {:?}", config);

    Generator::new(config).run().await?;

    Ok(())
}

/// Initialize tracing subscriber
///
/// Diagnostics go to stderr, prefixed with the `setupgen` target, so stdout
/// only carries the optional document dump.
fn init_tracing(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_level(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
