//! Repository Implementation

use crate::record::{HistorySummary, Page, ScanRecord};
use crate::{ScanHistory, SensorSource, StorageError};
use sensor_data::{SensorSample, Validator};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

/// Maximum number of records returned by a history listing
pub const HISTORY_LIMIT: usize = 200;

/// Scans per page
pub const PAGE_SIZE: usize = 20;

/// In-memory repository for sensor samples and scan history
pub struct Repository {
    /// Sensor samples in arrival order
    sensor_log: Mutex<VecDeque<SensorSample>>,
    /// Scan records in arrival order
    scans: Mutex<Vec<ScanRecord>>,
    /// Max sensor records (one day at one sample every 5 s)
    max_sensor_records: usize,
    /// Max scan records
    max_scan_records: usize,
    validator: Validator,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            sensor_log: Mutex::new(VecDeque::with_capacity(1024)),
            scans: Mutex::new(Vec::with_capacity(256)),
            max_sensor_records: 17_280,
            max_scan_records: 10_000,
            validator: Validator::default(),
        }
    }

    /// Validate and store a sensor sample
    pub fn insert_sample(&self, sample: SensorSample) -> Result<(), StorageError> {
        self.validator.validate(&sample)?;

        let mut log = lock(&self.sensor_log)?;

        // Enforce retention
        while log.len() >= self.max_sensor_records {
            log.pop_front();
        }

        log.push_back(sample);
        Ok(())
    }

    /// Get total sensor count
    pub fn sensor_count(&self) -> usize {
        self.sensor_log.lock().map(|l| l.len()).unwrap_or(0)
    }

    /// Get total scan count
    pub fn scan_count(&self) -> usize {
        self.scans.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Scans newest first
    fn scans_newest_first(&self) -> Result<Vec<ScanRecord>, StorageError> {
        let scans = lock(&self.scans)?;
        let mut sorted: Vec<_> = scans.iter().rev().cloned().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sorted)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for Repository {
    fn latest(&self) -> Result<Option<SensorSample>, StorageError> {
        let log = lock(&self.sensor_log)?;
        Ok(log.iter().max_by_key(|s| s.timestamp).copied())
    }

    fn history(&self, limit: usize) -> Result<Vec<SensorSample>, StorageError> {
        let log = lock(&self.sensor_log)?;
        let mut samples: Vec<_> = log.iter().rev().copied().collect();
        samples.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        samples.truncate(limit.min(HISTORY_LIMIT));
        Ok(samples)
    }
}

impl ScanHistory for Repository {
    fn record(&self, scan: ScanRecord) -> Result<Uuid, StorageError> {
        if !(0.0..=1.0).contains(&scan.confidence) {
            return Err(StorageError::InvalidConfidence(scan.confidence));
        }

        let mut scans = lock(&self.scans)?;

        // Enforce retention
        if scans.len() >= self.max_scan_records {
            scans.remove(0);
        }

        let id = scan.id;
        debug!("Recorded scan {} ({}, {:?})", id, scan.disease, scan.severity);
        scans.push(scan);
        Ok(id)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScanRecord>, StorageError> {
        let mut scans = self.scans_newest_first()?;
        scans.truncate(limit.min(HISTORY_LIMIT));
        Ok(scans)
    }

    fn page(&self, page: usize) -> Result<Page<ScanRecord>, StorageError> {
        let page = page.max(1);
        let scans = self.scans_newest_first()?;
        let total = scans.len();

        let data = scans
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Ok(Page {
            data,
            total,
            page,
            pages: total.div_ceil(PAGE_SIZE),
        })
    }

    fn get(&self, id: Uuid) -> Result<ScanRecord, StorageError> {
        let scans = lock(&self.scans)?;
        scans
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        let mut scans = lock(&self.scans)?;
        let index = scans
            .iter()
            .position(|s| s.id == id)
            .ok_or(StorageError::NotFound(id))?;
        scans.remove(index);
        debug!("Deleted scan {}", id);
        Ok(())
    }

    fn summary(&self) -> Result<HistorySummary, StorageError> {
        let scans = lock(&self.scans)?;
        let mut summary = HistorySummary {
            total_scans: scans.len(),
            ..Default::default()
        };

        for scan in scans.iter() {
            *summary.disease_distribution.entry(scan.disease.clone()).or_insert(0) += 1;
            *summary.severity_distribution.entry(scan.severity).or_insert(0) += 1;
        }

        Ok(summary)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HistorySeverity;
    use chrono::{DateTime, TimeZone, Utc};
    use sensor_data::ValidationError;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn scan(disease: &str, severity: HistorySeverity, secs: i64) -> ScanRecord {
        ScanRecord::new(disease, 0.9, severity, at(secs))
    }

    #[test]
    fn test_sample_insert_and_latest() {
        let repo = Repository::new();
        assert_eq!(repo.latest().unwrap(), None);

        repo.insert_sample(SensorSample::new(24.0, 70.0, 2500.0, at(0))).unwrap();
        repo.insert_sample(SensorSample::new(25.0, 72.0, 2510.0, at(5))).unwrap();

        assert_eq!(repo.latest().unwrap().map(|s| s.temperature), Some(25.0));
        let history = repo.history(10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp, at(5));
    }

    #[test]
    fn test_invalid_sample_rejected() {
        let repo = Repository::new();
        let err = repo
            .insert_sample(SensorSample::new(24.0, 140.0, 2500.0, at(0)))
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::InvalidSample(ValidationError::OutOfRange { field: "humidity", .. })
        ));
        assert_eq!(repo.sensor_count(), 0);
    }

    #[test]
    fn test_sensor_retention_limit() {
        let mut repo = Repository::new();
        repo.max_sensor_records = 5;

        for i in 0..10 {
            repo.insert_sample(SensorSample::new(20.0 + i as f64, 70.0, 2500.0, at(i))).unwrap();
        }

        assert_eq!(repo.sensor_count(), 5);
        assert_eq!(repo.history(100).unwrap().last().map(|s| s.timestamp), Some(at(5)));
    }

    #[test]
    fn test_scan_record_and_get() {
        let repo = Repository::new();
        let record = scan("Blister_Blight", HistorySeverity::High, 0)
            .with_recommendations(["Apply recommended fungicide"])
            .with_image_url("https://cdn.teaguard.io/scans/leaf-0001.jpg");

        let id = repo.record(record.clone()).unwrap();
        let stored = repo.get(id).unwrap();
        assert_eq!(stored, record);
        assert_eq!(
            stored.image_url.as_deref(),
            Some("https://cdn.teaguard.io/scans/leaf-0001.jpg")
        );
    }

    #[test]
    fn test_confidence_must_be_probability() {
        let repo = Repository::new();
        let mut record = scan("Brown_Blight", HistorySeverity::Low, 0);
        record.confidence = 1.2;

        assert!(matches!(repo.record(record), Err(StorageError::InvalidConfidence(_))));
    }

    #[test]
    fn test_delete_missing_scan() {
        let repo = Repository::new();
        let id = repo.record(scan("Brown_Blight", HistorySeverity::Low, 0)).unwrap();

        repo.delete(id).unwrap();
        assert!(matches!(repo.delete(id), Err(StorageError::NotFound(missing)) if missing == id));
        assert!(repo.get(id).is_err());
    }

    #[test]
    fn test_pagination() {
        let repo = Repository::new();
        for i in 0..45 {
            repo.record(scan("Healthy_leaves", HistorySeverity::Low, i)).unwrap();
        }

        let first = repo.page(1).unwrap();
        assert_eq!(first.total, 45);
        assert_eq!(first.pages, 3);
        assert_eq!(first.data.len(), PAGE_SIZE);
        assert_eq!(first.data[0].timestamp, at(44));

        let last = repo.page(3).unwrap();
        assert_eq!(last.data.len(), 5);
        assert_eq!(last.data[4].timestamp, at(0));

        // Page 0 is treated as the first page
        assert_eq!(repo.page(0).unwrap().page, 1);
        assert!(repo.page(4).unwrap().data.is_empty());
    }

    #[test]
    fn test_recent_is_capped() {
        let repo = Repository::new();
        for i in 0..210 {
            repo.record(scan("Healthy_leaves", HistorySeverity::Low, i)).unwrap();
        }
        assert_eq!(repo.recent(500).unwrap().len(), HISTORY_LIMIT);
        assert_eq!(repo.recent(3).unwrap()[0].timestamp, at(209));
    }

    #[test]
    fn test_summary() {
        let repo = Repository::new();
        assert_eq!(repo.summary().unwrap(), HistorySummary::default());

        repo.record(scan("Blister_Blight", HistorySeverity::High, 0)).unwrap();
        repo.record(scan("Blister_Blight", HistorySeverity::Medium, 1)).unwrap();
        repo.record(scan("Red_Spider_Mite", HistorySeverity::Critical, 2)).unwrap();

        let summary = repo.summary().unwrap();
        assert_eq!(summary.total_scans, 3);
        assert_eq!(summary.disease_distribution["Blister_Blight"], 2);
        assert_eq!(summary.severity_distribution[&HistorySeverity::Critical], 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["severity_distribution"]["HIGH"], 1);
    }
}
