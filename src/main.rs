use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tourguide::{TourGuideConfig, telemetry, web};

/// Tourist guide API for Meghalaya and Guwahati
#[derive(Parser, Debug)]
#[command(name = "tourguide", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TourGuideConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    telemetry::init(&config.logging)?;
    tracing::debug!(
        "OSRM at {}, OpenRouteService fallback {}",
        config.routing.osrm_base_url,
        if config.routing.ors_api_key.is_some() { "enabled" } else { "disabled" }
    );

    web::run(&config).await
}
