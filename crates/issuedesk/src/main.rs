//! Issuedesk CLI binary.

use anyhow::Result;
use issuedesk::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Single-threaded runtime; every command is a short sequence of file I/O.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // RUST_LOG=issuedesk=debug,issuedesk_jsonl=trace for more detail
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("issuedesk=info,issuedesk_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("starting issuedesk CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    Ok(())
}
