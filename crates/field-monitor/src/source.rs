//! JSON-lines sensor source
//!
//! The sensor bridge appends one JSON object per reading to a file. The last
//! line is the latest reading.

use sensor_data::{SensorSample, Validator};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use storage::{SensorSource, StorageError, HISTORY_LIMIT};
use tracing::warn;

/// Reads samples from a JSON-lines file on every call
pub struct JsonLinesSource {
    path: PathBuf,
    validator: Validator,
}

impl JsonLinesSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            validator: Validator::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All usable samples in file order. A missing file means the device has
    /// not reported yet.
    fn read_samples(&self) -> Result<Vec<SensorSample>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::SourceUnavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut samples = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let sample: SensorSample = match serde_json::from_str(line) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Skipping malformed sample at line {}: {}", index + 1, e);
                    continue;
                }
            };

            if let Err(e) = self.validator.validate(&sample) {
                warn!("Skipping implausible sample at line {}: {}", index + 1, e);
                continue;
            }

            samples.push(sample);
        }

        Ok(samples)
    }
}

impl SensorSource for JsonLinesSource {
    fn latest(&self) -> Result<Option<SensorSample>, StorageError> {
        Ok(self.read_samples()?.pop())
    }

    fn history(&self, limit: usize) -> Result<Vec<SensorSample>, StorageError> {
        let samples = self.read_samples()?;
        Ok(samples
            .into_iter()
            .rev()
            .take(limit.min(HISTORY_LIMIT))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_source(name: &str, contents: &str) -> JsonLinesSource {
        let path = std::env::temp_dir().join(format!(
            "field-monitor-{}-{}.jsonl",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        JsonLinesSource::new(path)
    }

    const LINES: &str = r#"{"temperature":24.0,"humidity":70.0,"soil_moisture":2500.0,"timestamp":"2026-05-01T06:00:00Z"}
{"temperature":25.0,"humidity":88.0,"soil_moisture":2450.0,"timestamp":"2026-05-01T06:00:05Z"}

{"temperature":26.0,"humidity":90.0,"soil_moisture":2440.0,"timestamp":"2026-05-01T06:00:10Z"}
"#;

    #[test]
    fn test_last_line_is_latest() {
        let source = temp_source("latest", LINES);
        let latest = source.latest().unwrap().unwrap();
        fs::remove_file(source.path()).ok();

        assert_eq!(latest.temperature, 26.0);
        assert_eq!(latest.humidity, 90.0);
    }

    #[test]
    fn test_history_newest_first() {
        let source = temp_source("history", LINES);
        let history = source.history(2).unwrap();
        fs::remove_file(source.path()).ok();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].temperature, 26.0);
        assert_eq!(history[1].temperature, 25.0);
    }

    #[test]
    fn test_malformed_and_implausible_lines_are_skipped() {
        let contents = format!(
            "{}\nnot json\n{{\"temperature\":24.0,\"humidity\":130.0,\"soil_moisture\":2500.0,\"timestamp\":\"2026-05-01T06:00:15Z\"}}\n",
            LINES.trim_end()
        );
        let source = temp_source("malformed", &contents);
        let history = source.history(10).unwrap();
        fs::remove_file(source.path()).ok();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].temperature, 26.0);
    }

    #[test]
    fn test_missing_file_has_no_samples() {
        let source = JsonLinesSource::new("/nonexistent/field-monitor/samples.jsonl");
        assert_eq!(source.latest().unwrap(), None);
        assert!(source.history(10).unwrap().is_empty());
    }
}
