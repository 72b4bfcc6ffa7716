//! Entry point for the Stack Advisor service

use anyhow::{Context, Result};
use clap::Parser;
use stack_advisor_core::{load_artifacts, Predictor};
use stack_advisor_service::{start_server, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "advisor-service")]
#[command(about = "Tech stack recommendation form and API")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding encoders.json and model.json
    #[arg(short, long)]
    artifacts: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        ServiceConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = cli.artifacts {
        config.artifacts_dir = dir;
    }

    init_logging(&config.log_level);

    info!("Starting Stack Advisor v{}", env!("CARGO_PKG_VERSION"));

    let artifacts = load_artifacts(&config.artifacts_dir).map_err(|e| {
        error!("Failed to load artifacts: {}", e);
        e
    })?;
    info!(
        "Loaded model {} ({} classes) from {}",
        artifacts.model_hash,
        artifacts.model.n_classes,
        config.artifacts_dir.display()
    );

    let predictor = Predictor::new(Arc::new(artifacts));
    start_server(predictor, &config.bind_addr()).await?;

    info!("Stack Advisor stopped gracefully");
    Ok(())
}

/// Initialize logging; RUST_LOG takes precedence over the configured level
fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
