//! Alert Lifecycle
//!
//! Keeps one alert on screen at a time: visible on arrival, emphasized for a
//! short window, then auto-dismissed. A newer alert replaces the current one
//! and a user dismissal cancels every pending timer.

mod lifecycle;
mod state;
mod throttle;

pub use lifecycle::{AlertId, AlertLifecycle, LifecycleTiming, Snapshot};
pub use state::{LifecycleEvent, LifecycleState};
pub use throttle::{AlertThrottle, ThrottleConfig};
