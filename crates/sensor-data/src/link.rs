//! Device link status

use crate::sample::SensorSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether the field device is currently reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Online,
    Offline,
}

impl LinkStatus {
    /// Online when the latest sample is fresher than `max_age`
    pub fn from_latest(
        latest: Option<&SensorSample>,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Self {
        match latest {
            Some(sample) if sample.is_fresh(now, max_age) => LinkStatus::Online,
            _ => LinkStatus::Offline,
        }
    }

    pub fn is_online(self) -> bool {
        self == LinkStatus::Online
    }
}

/// Human "last seen" text: `42s ago`, `5m ago`, `3h ago`, or the full time
/// after a day.
pub fn describe_last_seen(last_seen: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = last_seen else {
        return "Never".to_string();
    };

    let seconds = now.signed_duration_since(ts).num_seconds().max(0);
    if seconds < 60 {
        return format!("{}s ago", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_link_status() {
        let sample = SensorSample::new(24.0, 70.0, 2500.0, at(0));
        let max_age = Duration::from_secs(30);

        assert_eq!(LinkStatus::from_latest(Some(&sample), at(10), max_age), LinkStatus::Online);
        assert_eq!(LinkStatus::from_latest(Some(&sample), at(45), max_age), LinkStatus::Offline);
        assert_eq!(LinkStatus::from_latest(None, at(0), max_age), LinkStatus::Offline);

        assert!(LinkStatus::Online.is_online());
        assert!(!LinkStatus::Offline.is_online());
    }

    #[test]
    fn test_describe_last_seen() {
        assert_eq!(describe_last_seen(None, at(0)), "Never");
        assert_eq!(describe_last_seen(Some(at(0)), at(42)), "42s ago");
        assert_eq!(describe_last_seen(Some(at(0)), at(5 * 60 + 10)), "5m ago");
        assert_eq!(describe_last_seen(Some(at(0)), at(3 * 3600)), "3h ago");
        assert_eq!(describe_last_seen(Some(at(10)), at(0)), "0s ago");
        assert!(describe_last_seen(Some(at(0)), at(2 * 86_400)).ends_with("UTC"));
    }
}
