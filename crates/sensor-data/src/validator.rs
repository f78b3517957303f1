//! Range Checking for Incoming Samples

use crate::error::ValidationError;
use crate::sample::{SensorSample, SOIL_ADC_FULL_SCALE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Temperature valid range (°C)
    pub temperature_range: (f64, f64),
    /// Relative humidity valid range (%)
    pub humidity_range: (f64, f64),
    /// Soil moisture valid range (raw ADC counts)
    pub soil_moisture_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            // DHT22 operating range
            temperature_range: (-40.0, 80.0),
            humidity_range: (0.0, 100.0),
            soil_moisture_range: (0.0, SOIL_ADC_FULL_SCALE),
        }
    }
}

/// Result of validating a whole sample
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

/// Validator for field device samples
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Check every metric and collect all failures
    pub fn check(&self, sample: &SensorSample) -> ValidationResult {
        let errors: Vec<_> = [
            self.validate_range("temperature", sample.temperature, self.config.temperature_range),
            self.validate_range("humidity", sample.humidity, self.config.humidity_range),
            self.validate_range(
                "soil_moisture",
                sample.soil_moisture,
                self.config.soil_moisture_range,
            ),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if !errors.is_empty() {
            debug!("Sample rejected with {} error(s): {:?}", errors.len(), errors);
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate a sample, failing on the first bad metric
    pub fn validate(&self, sample: &SensorSample) -> Result<(), ValidationError> {
        match self.check(sample).errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
