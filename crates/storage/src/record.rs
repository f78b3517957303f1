//! Scan history records

use chrono::{DateTime, Utc};
use sensor_data::SensorSample;
use serde::{Deserialize, Serialize};
use severity::Severity;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Severity as stored in scan history. `Critical` is only ever written by
/// external tools; the classifier stops at `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistorySeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl From<Severity> for HistorySeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => HistorySeverity::Low,
            Severity::Medium => HistorySeverity::Medium,
            Severity::High => HistorySeverity::High,
        }
    }
}

/// A stored leaf scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: Uuid,
    pub image_url: Option<String>,
    /// Class name as reported by the leaf classifier
    pub disease: String,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
    pub severity: HistorySeverity,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Raw ADC counts
    pub soil_moisture: Option<f64>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    /// Create a record with a fresh id and no sensor context
    pub fn new(
        disease: impl Into<String>,
        confidence: f64,
        severity: HistorySeverity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_url: None,
            disease: disease.into(),
            confidence,
            severity,
            temperature: None,
            humidity: None,
            soil_moisture: None,
            recommendations: Vec::new(),
            timestamp,
        }
    }

    /// Attach the field conditions at scan time
    pub fn with_conditions(mut self, sample: &SensorSample) -> Self {
        self.temperature = Some(sample.temperature);
        self.humidity = Some(sample.humidity);
        self.soil_moisture = Some(sample.soil_moisture);
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Total number of records across all pages
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}

/// Aggregate counts over the scan history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_scans: usize,
    pub disease_distribution: BTreeMap<String, usize>,
    pub severity_distribution: BTreeMap<HistorySeverity, usize>,
}
