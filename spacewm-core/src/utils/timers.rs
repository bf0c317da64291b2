//! One-shot timers driven by the display server's event loop.
use crate::models::WindowHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Show the switcher once the delay has passed.
    DelayedShow,
    /// Replay a walk step after the switcher changed its mode.
    ModeSwitchSettle { forward: bool },
    AutoRaise(WindowHandle),
}

/// Pending timers. A token is handed out once and forgotten when it fires
/// or is stopped, so late expirations are recognised as stale.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Timers {
    next: u64,
    pending: HashMap<u64, TimerKind>,
}

impl Timers {
    pub fn start(&mut self, kind: TimerKind) -> TimerToken {
        self.next += 1;
        self.pending.insert(self.next, kind);
        TimerToken(self.next)
    }

    /// Returns whether the timer was still pending.
    pub fn stop(&mut self, token: TimerToken) -> bool {
        self.pending.remove(&token.0).is_some()
    }

    /// Claim an expired timer. `None` for stopped or unknown tokens.
    pub fn take(&mut self, token: TimerToken) -> Option<TimerKind> {
        self.pending.remove(&token.0)
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.contains_key(&token.0)
    }
}
