//! Sensor Sample

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Full-scale count of the 12-bit soil moisture ADC on the field device.
///
/// Soil moisture is stored in raw counts (higher = wetter). Percent is
/// derived as `raw * 100 / SOIL_ADC_FULL_SCALE`, clamped to `[0, 100]`.
pub const SOIL_ADC_FULL_SCALE: f64 = 4095.0;

/// A single reading from the field device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Soil moisture (raw ADC counts)
    pub soil_moisture: f64,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

/// The three metrics of a sample, without its capture time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

impl SensorSample {
    /// Create a new sample
    pub fn new(
        temperature: f64,
        humidity: f64,
        soil_moisture: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            temperature,
            humidity,
            soil_moisture,
            timestamp,
        }
    }

    /// Soil moisture as a percentage of the ADC full scale
    pub fn soil_moisture_percent(&self) -> f64 {
        (self.soil_moisture * 100.0 / SOIL_ADC_FULL_SCALE).clamp(0.0, 100.0)
    }

    /// Time elapsed since capture. Timestamps ahead of `now` count as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Whether the sample is younger than `max_age`
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) < max_age
    }

    /// Metrics of this sample
    pub fn conditions(&self) -> Conditions {
        Conditions {
            temperature: self.temperature,
            humidity: self.humidity,
            soil_moisture: self.soil_moisture,
        }
    }
}
