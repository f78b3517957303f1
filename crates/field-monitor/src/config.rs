//! Monitor configuration

use crate::MonitorError;
use alerting::{LifecycleTiming, ThrottleConfig};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "field-monitor.toml";

/// Prefix of environment overrides, e.g. `FIELD_MONITOR__POLL_INTERVAL_SECS`
pub const ENV_PREFIX: &str = "FIELD_MONITOR";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Field monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Interval between sensor polls (seconds)
    pub poll_interval_secs: u64,

    /// Sample age after which the device counts as offline and no risk
    /// alert is raised (seconds)
    pub sensor_freshness_secs: u64,

    /// Sample age after which a scan is assessed without sensor context
    /// (seconds)
    pub advisory_freshness_secs: u64,

    /// JSON-lines file the sensor bridge appends samples to
    pub samples_path: PathBuf,

    pub logging: LoggingConfig,

    /// Timing of disease-risk alerts
    pub risk_alert: LifecycleTiming,

    /// Timing of the scan advisory panel
    pub advisory_panel: LifecycleTiming,

    /// Repeat suppression for risk alerts
    pub throttle: ThrottleConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            sensor_freshness_secs: 30,
            advisory_freshness_secs: 15,
            samples_path: PathBuf::from("sensor-samples.jsonl"),
            logging: LoggingConfig::default(),
            risk_alert: LifecycleTiming::risk_alert(),
            advisory_panel: LifecycleTiming::advisory_panel(),
            throttle: ThrottleConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load from defaults, then the config file, then the environment.
    /// Each layer may set any subset of keys, including single fields of a
    /// nested section.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config = Config::builder()
            .add_source(Config::try_from(&MonitorConfig::default())?)
            .add_source(File::from(file).required(path.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn sensor_freshness(&self) -> Duration {
        Duration::from_secs(self.sensor_freshness_secs)
    }

    pub fn advisory_freshness(&self) -> Duration {
        Duration::from_secs(self.advisory_freshness_secs)
    }
}
