use clap::Parser;
use tracing_subscriber::EnvFilter;

use balance_sheet_fixer::cli::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Diagnostics go to stderr so they never mix with data (set RUST_LOG to tune)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().run().await
}
