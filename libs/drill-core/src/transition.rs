//! Delayed transitions issued by the engines.
//!
//! An engine never sleeps. When feedback has to stay on screen it hands back
//! a [`PendingTransition`] and the host schedules it; when the delay elapses
//! the host calls the engine's `fire` with the token. Only the newest token is
//! honoured, so scheduling a transition supersedes whatever was pending.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monotonic id of a scheduled transition within one engine.
pub type TransitionToken = u64;

/// What happens when a pending transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// Move past a correctly answered word.
    Advance,
    /// Reshuffle the current block and start it over.
    RestartBlock,
    /// Reshuffle the whole selection and start a new test attempt.
    RestartRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub token: TransitionToken,
    pub action: TransitionAction,
    pub delay_ms: u64,
}

impl PendingTransition {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Holds at most one pending transition.
#[derive(Debug, Default)]
pub struct TransitionSlot {
    last_token: TransitionToken,
    pending: Option<PendingTransition>,
}

impl TransitionSlot {
    /// Schedule `action`, replacing any pending transition.
    pub fn schedule(&mut self, action: TransitionAction, delay_ms: u64) -> PendingTransition {
        self.last_token += 1;
        let pending = PendingTransition {
            token: self.last_token,
            action,
            delay_ms,
        };
        self.pending = Some(pending);
        pending
    }

    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Claim the pending action if `token` is still the current one.
    pub fn take_if_current(&mut self, token: TransitionToken) -> Option<TransitionAction> {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                Some(p.action)
            }
            _ => None,
        }
    }
}
