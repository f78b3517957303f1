//! Alert Lifecycle Controller

use crate::state::{LifecycleEvent, LifecycleState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

/// Identity of a presented alert, unique per controller
pub type AlertId = u64;

/// Timing of an alert on screen, measured from its arrival
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleTiming {
    /// Emphasis window in milliseconds (0 = no emphasis)
    pub emphasis_ms: u64,
    /// Auto-dismiss after this many milliseconds
    pub auto_dismiss_ms: u64,
}

impl LifecycleTiming {
    /// Disease-risk alert: 3 s emphasis, hidden after 12 s
    pub fn risk_alert() -> Self {
        Self {
            emphasis_ms: 3_000,
            auto_dismiss_ms: 12_000,
        }
    }

    /// Advisory panel: no emphasis, hidden after 15 s
    pub fn advisory_panel() -> Self {
        Self {
            emphasis_ms: 0,
            auto_dismiss_ms: 15_000,
        }
    }

    fn emphasis(&self) -> Option<Duration> {
        (self.emphasis_ms > 0).then(|| Duration::from_millis(self.emphasis_ms))
    }

    fn auto_dismiss(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms)
    }
}

impl Default for LifecycleTiming {
    fn default() -> Self {
        Self::risk_alert()
    }
}

/// Observable state of the controller's single slot
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Most recently presented alert, if any
    pub id: Option<AlertId>,
    pub state: LifecycleState,
    /// Payload of that alert; kept after it leaves the screen
    pub alert: Option<T>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            id: None,
            state: LifecycleState::Hidden,
            alert: None,
        }
    }
}

/// Drives the on-screen life of one alert at a time.
///
/// Timers run as tokio tasks, so `present` must be called from within a
/// tokio runtime. Presenting a new alert or dismissing the current one aborts
/// the outstanding timer task.
pub struct AlertLifecycle<T> {
    timing: LifecycleTiming,
    slot: Arc<watch::Sender<Snapshot<T>>>,
    next_id: AlertId,
    timer: Option<JoinHandle<()>>,
}

impl<T> AlertLifecycle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new controller with nothing on screen
    pub fn new(timing: LifecycleTiming) -> Self {
        let (slot, _) = watch::channel(Snapshot::default());
        Self {
            timing,
            slot: Arc::new(slot),
            next_id: 0,
            timer: None,
        }
    }

    /// Show `alert`, replacing whatever is on screen, and start its timers
    pub fn present(&mut self, alert: T) -> AlertId {
        self.cancel_timer();

        self.next_id += 1;
        let id = self.next_id;
        let arrived = Instant::now();
        let emphasis = self.timing.emphasis();
        let auto_dismiss = self.timing.auto_dismiss();

        self.slot.send_modify(|snap| {
            if snap.state.is_visible() {
                debug!("Alert {:?} superseded by alert {}", snap.id, id);
            }
            snap.id = Some(id);
            snap.alert = Some(alert);
            snap.state = snap.state.next(LifecycleEvent::AlertArrived);
            if emphasis.is_none() {
                snap.state = snap.state.next(LifecycleEvent::EmphasisElapsed);
            }
        });
        info!("Alert {} presented (auto-dismiss in {:?})", id, auto_dismiss);

        let slot = Arc::clone(&self.slot);
        self.timer = Some(tokio::spawn(async move {
            if let Some(emphasis) = emphasis {
                sleep_until(arrived + emphasis).await;
                apply(&slot, id, LifecycleEvent::EmphasisElapsed);
            }
            sleep_until(arrived + auto_dismiss).await;
            if apply(&slot, id, LifecycleEvent::TimeoutElapsed) {
                debug!("Alert {} auto-dismissed", id);
            }
        }));

        id
    }

    /// Close the current alert. Returns whether anything was visible.
    pub fn dismiss(&mut self) -> bool {
        self.cancel_timer();

        let current = self.slot.borrow().id;
        let Some(id) = current else {
            return false;
        };
        let dismissed = apply(&self.slot, id, LifecycleEvent::UserDismissed);
        if dismissed {
            info!("Alert {} dismissed by user", id);
        }
        dismissed
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.slot.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.slot.borrow().clone()
    }

    pub fn state(&self) -> LifecycleState {
        self.slot.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    pub fn is_emphasized(&self) -> bool {
        self.state() == LifecycleState::Emphasized
    }

    /// Alert currently on screen
    pub fn current(&self) -> Option<T> {
        let snap = self.slot.borrow();
        if snap.state.is_visible() {
            snap.alert.clone()
        } else {
            None
        }
    }

    pub fn timing(&self) -> &LifecycleTiming {
        &self.timing
    }
}

impl<T> AlertLifecycle<T> {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for AlertLifecycle<T> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Apply `event` if `id` is still the current alert. Returns whether the
/// state changed.
fn apply<T>(slot: &watch::Sender<Snapshot<T>>, id: AlertId, event: LifecycleEvent) -> bool {
    slot.send_if_modified(|snap| {
        if snap.id != Some(id) {
            return false;
        }
        let next = snap.state.next(event);
        if next == snap.state {
            return false;
        }
        snap.state = next;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_risk_alert_lifecycle() {
        let mut lifecycle = AlertLifecycle::new(LifecycleTiming::risk_alert());
        lifecycle.present("blister blight");

        assert!(lifecycle.is_emphasized());
        assert_eq!(lifecycle.current(), Some("blister blight"));

        sleep(ms(3_100)).await;
        assert_eq!(lifecycle.state(), LifecycleState::Visible);
        assert!(lifecycle.is_visible());

        sleep(ms(8_800)).await; // 11.9 s
        assert!(lifecycle.is_visible());

        sleep(ms(200)).await; // 12.1 s
        assert_eq!(lifecycle.state(), LifecycleState::Hidden);
        assert_eq!(lifecycle.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advisory_panel_has_no_emphasis() {
        let mut lifecycle = AlertLifecycle::new(LifecycleTiming::advisory_panel());
        lifecycle.present(7u32);

        assert_eq!(lifecycle.state(), LifecycleState::Visible);

        sleep(ms(14_900)).await;
        assert!(lifecycle.is_visible());

        sleep(ms(200)).await;
        assert_eq!(lifecycle.state(), LifecycleState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_alert_replaces_current() {
        let mut lifecycle = AlertLifecycle::new(LifecycleTiming::risk_alert());
        let first = lifecycle.present("A");

        sleep(ms(1_000)).await;
        let second = lifecycle.present("B");
        assert_ne!(first, second);
        assert_eq!(lifecycle.current(), Some("B"));
        assert!(lifecycle.is_emphasized());

        // A's emphasis window would have ended at 3 s
        sleep(ms(2_500)).await; // 3.5 s
        assert!(lifecycle.is_emphasized());

        // A's auto-dismiss would have fired at 12 s
        sleep(ms(9_000)).await; // 12.5 s
        assert_eq!(lifecycle.current(), Some("B"));

        sleep(ms(600)).await; // 13.1 s
        assert_eq!(lifecycle.state(), LifecycleState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timers() {
        let mut lifecycle = AlertLifecycle::new(LifecycleTiming::risk_alert());
        lifecycle.present("B");

        sleep(ms(1_000)).await;
        assert!(lifecycle.dismiss());
        assert_eq!(lifecycle.state(), LifecycleState::Dismissed);
        assert!(lifecycle.timer.is_none());

        // A later alert must not be hidden by B's old deadline
        sleep(ms(10_000)).await; // 11 s
        lifecycle.present("C");

        sleep(ms(1_500)).await; // 12.5 s
        assert_eq!(lifecycle.current(), Some("C"));

        sleep(ms(20_000)).await;
        assert_eq!(lifecycle.state(), LifecycleState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_with_nothing_shown() {
        let mut lifecycle: AlertLifecycle<&str> = AlertLifecycle::new(LifecycleTiming::default());
        assert!(!lifecycle.dismiss());

        lifecycle.present("A");
        sleep(ms(13_000)).await;
        // Already timed out
        assert!(!lifecycle.dismiss());
        assert_eq!(lifecycle.state(), LifecycleState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_transitions() {
        let mut lifecycle = AlertLifecycle::new(LifecycleTiming::risk_alert());
        let mut rx = lifecycle.subscribe();

        let id = lifecycle.present("A");
        rx.changed().await.unwrap();
        {
            let snap = rx.borrow_and_update();
            assert_eq!(snap.id, Some(id));
            assert_eq!(snap.state, LifecycleState::Emphasized);
        }

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().state, LifecycleState::Visible);

        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.state, LifecycleState::Hidden);
        assert_eq!(snap.alert, Some("A"));
    }
}
