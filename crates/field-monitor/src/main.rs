//! Field Monitor - Main Entry Point

use field_monitor::{init_logging, FieldMonitor, JsonLinesSource, MonitorConfig};
use std::path::PathBuf;
use storage::Repository;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = MonitorConfig::load(config_path.as_deref())?;
    init_logging(&config.logging);

    info!("=== Field Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Reading sensor samples from {}", config.samples_path.display());

    let source = JsonLinesSource::new(&config.samples_path);
    let mut monitor = FieldMonitor::new(source, Repository::new(), config);

    monitor
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await;

    Ok(())
}
