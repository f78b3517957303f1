//! Alert presentation state machine

use serde::{Deserialize, Serialize};

/// Presentation state of the current alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Nothing shown, or the last alert timed out
    #[default]
    Hidden,
    /// Visible and drawing attention
    Emphasized,
    /// Visible
    Visible,
    /// Closed by the user
    Dismissed,
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    AlertArrived,
    EmphasisElapsed,
    TimeoutElapsed,
    UserDismissed,
}

impl LifecycleState {
    /// State after `event`. Events that do not apply leave the state as is.
    pub fn next(self, event: LifecycleEvent) -> Self {
        use LifecycleEvent::*;
        use LifecycleState::*;

        match (self, event) {
            (_, AlertArrived) => Emphasized,
            (Emphasized, EmphasisElapsed) => Visible,
            (Emphasized | Visible, TimeoutElapsed) => Hidden,
            (Emphasized | Visible, UserDismissed) => Dismissed,
            (state, _) => state,
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, LifecycleState::Emphasized | LifecycleState::Visible)
    }
}
