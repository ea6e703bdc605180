//! issuedesk HTTP service binary.

use anyhow::Context as _;
use clap::Parser;
use issuedesk_server::{AppState, app};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "issuedesk-server")]
#[command(author, version, about = "Serve an issuedesk workspace over HTTP", long_about = None)]
struct Args {
    /// Address to listen on (overrides `server.bind` in config.yaml)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory inside the workspace (default: current directory)
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("issuedesk_server=info,issuedesk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let working_dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let (state, config) = AppState::open(&working_dir).await?;
    let bind = match args.bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .with_context(|| format!("invalid server.bind '{}'", config.server.bind))?,
    };

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "issuedesk-server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("issuedesk-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
