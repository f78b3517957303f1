//! Leaf scan assessment
//!
//! Grades a classifier result against the live field conditions and picks
//! the advisory to show.

use advisory::{resolve_advisory, AdvisoryEntry};
use chrono::{DateTime, Utc};
use sensor_data::SensorSample;
use serde::Serialize;
use severity::{classify_severity, DiseaseLabel, Severity};
use std::time::Duration;
use storage::ScanRecord;
use tracing::debug;

/// Outcome of assessing one leaf scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanAssessment {
    /// Class name as reported by the leaf classifier
    pub disease: String,
    pub label: DiseaseLabel,
    pub confidence: f64,
    pub severity: Severity,
    pub advisory: &'static AdvisoryEntry,
    /// Sample the severity was graded against; `None` if missing or stale
    pub conditions: Option<SensorSample>,
}

/// Assess a scan. A sample older than `max_age` is treated as missing.
pub fn assess_scan(
    class_name: &str,
    confidence: f64,
    sample: Option<&SensorSample>,
    now: DateTime<Utc>,
    max_age: Duration,
) -> ScanAssessment {
    let label = DiseaseLabel::parse(class_name);
    let conditions = sample.filter(|s| s.is_fresh(now, max_age)).copied();
    if sample.is_some() && conditions.is_none() {
        debug!("Sensor sample too old for scan assessment, grading without it");
    }

    let severity = classify_severity(label, conditions.as_ref());

    ScanAssessment {
        disease: class_name.to_string(),
        label,
        confidence,
        severity,
        advisory: resolve_advisory(label, severity),
        conditions,
    }
}

impl ScanAssessment {
    /// History record for this scan
    pub fn to_record(&self, timestamp: DateTime<Utc>) -> ScanRecord {
        let record = ScanRecord::new(
            self.disease.clone(),
            self.confidence,
            self.severity.into(),
            timestamp,
        )
        .with_recommendations(self.advisory.actions.iter().copied());

        match &self.conditions {
            Some(sample) => record.with_conditions(sample),
            None => record,
        }
    }
}
