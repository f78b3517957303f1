//! Repeat suppression for alerts raised on every poll

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Throttle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum time before the same alert kind is shown again (seconds)
    pub cooldown_seconds: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 60,
        }
    }
}

/// Suppresses re-presenting the same kind of alert within a cooldown.
///
/// A different kind of alert always passes.
pub struct AlertThrottle<K> {
    cooldown: Duration,
    last_key: Option<K>,
    last_fired: HashMap<K, Instant>,
}

impl<K> AlertThrottle<K>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            cooldown: Duration::from_secs(config.cooldown_seconds),
            last_key: None,
            last_fired: HashMap::new(),
        }
    }

    /// Whether an alert of kind `key` should be shown now
    pub fn should_fire(&self, key: K, now: Instant) -> bool {
        if self.last_key != Some(key) {
            return true;
        }
        match self.last_fired.get(&key) {
            Some(last) if now.saturating_duration_since(*last) < self.cooldown => {
                debug!("Alert {:?} suppressed: in cooldown period", key);
                false
            }
            _ => true,
        }
    }

    /// Record that an alert of kind `key` was shown
    pub fn record_fire(&mut self, key: K, now: Instant) {
        self.last_key = Some(key);
        self.last_fired.insert(key, now);
    }

    /// Forget all history
    pub fn clear(&mut self) {
        self.last_key = None;
        self.last_fired.clear();
    }
}
