//! The window and subspace switcher.
//!
//! `Tabbox` only keeps the session of a walk: the mode, the entries, the
//! selection and the grab bookkeeping. The walk itself is driven from the
//! handlers, which own the collaborators it needs.
pub mod config;
mod mode;
pub mod model;
pub mod shortcuts;

use crate::models::WindowHandle;
use crate::utils::modmask_lookup::KeyCombo;
use crate::utils::timers::TimerToken;
use serde::{Deserialize, Serialize};

pub use config::{TabboxConfig, TabboxSettings};
pub use mode::TabboxMode;
pub use shortcuts::{TabboxShortcuts, WalkAction};

/// Notifications about the switcher for the display server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TabboxEvent {
    Added(TabboxMode),
    Closed,
    /// The entries or the selection changed.
    Updated,
    /// A grabbed key that is not bound to a walk.
    KeyEvent(KeyCombo),
    Highlight(Option<WindowHandle>),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Window(WindowHandle),
    Subspace(u32),
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Tabbox {
    mode: TabboxMode,
    pub settings: TabboxSettings,
    pub shortcuts: TabboxShortcuts,
    candidates: Vec<Candidate>,
    index: Option<usize>,
    display_refcount: u32,
    pub(crate) is_shown: bool,
    /// An effect took the switcher over and holds a display reference.
    pub(crate) effect_shown: bool,
    pub(crate) tab_grab: bool,
    pub(crate) desktop_grab: bool,
    pub(crate) no_modifier_grab: bool,
    pub(crate) delayed_show: Option<TimerToken>,
    pub(crate) mode_switch: Option<TimerToken>,
}

impl Tabbox {
    pub fn mode(&self) -> TabboxMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: TabboxMode) {
        if self.mode != mode {
            tracing::debug!("Switcher mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn config(&self) -> &TabboxConfig {
        self.settings.config(self.mode)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn current(&self) -> Option<Candidate> {
        self.index.and_then(|index| self.candidates.get(index).copied())
    }

    pub fn current_window(&self) -> Option<WindowHandle> {
        match self.current() {
            Some(Candidate::Window(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn current_desktop(&self) -> Option<u32> {
        match self.current() {
            Some(Candidate::Subspace(x11_id)) => Some(x11_id),
            _ => None,
        }
    }

    /// Replace the entries. A full reset selects `seed`, a partial one keeps
    /// the previous selection while it is still listed. Both fall back to
    /// the first entry.
    pub(crate) fn set_candidates(
        &mut self,
        candidates: Vec<Candidate>,
        seed: Option<Candidate>,
        partial: bool,
    ) {
        let keep = if partial { self.current() } else { seed };
        self.candidates = candidates;
        self.index = keep
            .and_then(|candidate| self.candidates.iter().position(|c| *c == candidate))
            .or(if self.candidates.is_empty() { None } else { Some(0) });
    }

    /// Move the selection one entry, wrapping at both ends.
    pub(crate) fn step(&mut self, forward: bool) -> bool {
        let len = self.candidates.len();
        if len == 0 {
            return false;
        }
        let index = self.index.unwrap_or(0);
        self.index = Some(if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        });
        true
    }

    pub fn is_grabbed(&self) -> bool {
        self.tab_grab || self.desktop_grab
    }

    pub fn is_displayed(&self) -> bool {
        self.display_refcount > 0
    }

    /// Whether the switcher is shown by us rather than by an effect.
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    pub fn has_no_modifier_grab(&self) -> bool {
        self.no_modifier_grab
    }

    /// Someone started displaying the switcher.
    pub fn reference(&mut self) {
        self.display_refcount += 1;
    }

    pub fn unreference(&mut self) {
        self.display_refcount = self.display_refcount.saturating_sub(1);
    }

    pub(crate) fn clear_grabs(&mut self) {
        self.tab_grab = false;
        self.desktop_grab = false;
        self.no_modifier_grab = false;
    }
}
