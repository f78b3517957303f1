//! Field Sensor Data
//!
//! Sensor samples as reported by the field device, soil moisture unit
//! conversion, freshness checks, ingest validation, and per-metric status.

mod error;
mod link;
mod sample;
mod status;
mod validator;

pub use error::ValidationError;
pub use link::{describe_last_seen, LinkStatus};
pub use sample::{Conditions, SensorSample, SOIL_ADC_FULL_SCALE};
pub use status::{assess_metric, Metric, MetricStatus, StatusLevel, WarningBadge};
pub use validator::{ValidationConfig, ValidationResult, Validator};
