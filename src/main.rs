//! Service entry point.

use std::path::PathBuf;

use clap::Parser;

use api_server::config::{load_config, ServerConfig};
use api_server::http::handlers;
use api_server::lifecycle::{self, Shutdown};
use api_server::observability::logging;

#[derive(Parser)]
#[command(version, about = "HTTP API service")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    lifecycle::signals::spawn(shutdown, config.timeouts.shutdown_grace());

    lifecycle::run(config, handlers::router(), signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
