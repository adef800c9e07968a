//! halldetect CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use halldetect::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse first so -v can pick the default log level
    let cli = Cli::parse();

    // Initialize tracing (RUST_LOG wins over -v)
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    cli.execute().await
}
