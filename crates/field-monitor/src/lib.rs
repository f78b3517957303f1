//! Field Monitor
//!
//! Host process for the advisory engine: polls the field sensor source,
//! raises disease-risk alerts, and assesses leaf scans against the live
//! conditions.

pub mod assessment;
pub mod config;
pub mod monitor;
pub mod source;

pub use assessment::{assess_scan, ScanAssessment};
pub use config::{LoggingConfig, MonitorConfig};
pub use monitor::{FieldMonitor, PollOutcome};
pub use source::JsonLinesSource;

use storage::StorageError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Host errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
            .expect("Failed to set tracing subscriber");
    } else {
        tracing::subscriber::set_global_default(builder.finish())
            .expect("Failed to set tracing subscriber");
    }
}
