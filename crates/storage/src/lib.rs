//! Storage Layer
//!
//! Interfaces to the sensor log and the leaf scan history, plus an in-memory
//! repository implementing both.

mod record;
mod repository;

pub use record::{HistorySeverity, HistorySummary, Page, ScanRecord};
pub use repository::{Repository, HISTORY_LIMIT, PAGE_SIZE};

use sensor_data::{SensorSample, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Sensor source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Record not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid sensor sample: {0}")]
    InvalidSample(#[from] ValidationError),
    #[error("Confidence {0} is outside [0, 1]")]
    InvalidConfidence(f64),
}

/// Source of field sensor readings
pub trait SensorSource {
    /// Most recent reading, if any
    fn latest(&self) -> Result<Option<SensorSample>, StorageError>;

    /// Up to `limit` readings, newest first
    fn history(&self, limit: usize) -> Result<Vec<SensorSample>, StorageError>;
}

/// Persistence for leaf scan results
pub trait ScanHistory {
    /// Store a scan and return its id
    fn record(&self, scan: ScanRecord) -> Result<Uuid, StorageError>;

    /// Up to `limit` scans, newest first
    fn recent(&self, limit: usize) -> Result<Vec<ScanRecord>, StorageError>;

    /// One page of scans, newest first. Pages start at 1.
    fn page(&self, page: usize) -> Result<Page<ScanRecord>, StorageError>;

    fn get(&self, id: Uuid) -> Result<ScanRecord, StorageError>;

    fn delete(&self, id: Uuid) -> Result<(), StorageError>;

    /// Counts per disease and per severity
    fn summary(&self) -> Result<HistorySummary, StorageError>;
}
