#![allow(clippy::wildcard_imports)]

use super::*;
use crate::tabbox::WalkAction;
use crate::utils::modmask_lookup::{KeyCombo, KeySequence};
use crate::utils::screen_edges::ElectricBorder;
use crate::utils::timers::{TimerKind, TimerToken};

impl<SERVER: DisplayServer> Manager<SERVER> {
    /// A key was pressed. While the switcher holds the keyboard every key
    /// goes to it, otherwise only bound global shortcuts are handled.
    /// Returns whether the key was consumed.
    pub fn key_pressed(&mut self, combo: &KeyCombo) -> bool {
        if self.state.tabbox.is_grabbed() {
            self.tabbox_key_press(combo);
            return true;
        }
        let Some(name) = self.state.shortcuts.action_for(combo).map(str::to_owned) else {
            return false;
        };
        self.shortcut_triggered(&name)
    }

    pub fn modifiers_released(&mut self) {
        if self.state.tabbox.is_grabbed() {
            self.tabbox_modifiers_released();
        }
    }

    /// Run the global action registered as `name`.
    pub fn shortcut_triggered(&mut self, name: &str) -> bool {
        let Some(action) = WalkAction::from_name(name) else {
            tracing::trace!("No handler for shortcut {:?}", name);
            return false;
        };
        self.walk(action);
        true
    }

    /// The user rebound a global shortcut.
    pub fn global_shortcut_changed(&mut self, name: &str, sequence: KeySequence) -> bool {
        if !self.state.shortcuts.set_shortcut(name, sequence.clone()) {
            return false;
        }
        tracing::debug!("Shortcut {:?} is now {}", name, sequence);
        if let Some(action) = WalkAction::from_name(name) {
            self.state.tabbox.shortcuts.set(action, sequence);
        }
        true
    }

    pub fn screen_edge_triggered(&mut self, edge: ElectricBorder) -> bool {
        if !self.state.screen_edges.is_reserved(edge) {
            return false;
        }
        self.tabbox_toggle(edge)
    }

    pub fn touch_edge_triggered(&mut self, edge: ElectricBorder) -> bool {
        if !self.state.screen_edges.is_touch_reserved(edge) {
            return false;
        }
        self.tabbox_touch_toggle(edge)
    }

    /// A timer handed out through `DisplayAction::StartTimer` fired.
    /// Returns false for tokens that were stopped or already fired.
    pub fn timer_elapsed(&mut self, token: TimerToken) -> bool {
        let Some(kind) = self.state.timers.take(token) else {
            tracing::trace!("Ignoring stale timer {:?}", token);
            return false;
        };
        match kind {
            TimerKind::DelayedShow => {
                self.state.tabbox.delayed_show = None;
                if self.state.tabbox.is_grabbed() {
                    self.tabbox_show();
                }
            }
            TimerKind::ModeSwitchSettle { forward } => self.mode_switch_settled(forward),
            TimerKind::AutoRaise(handle) => self.state.auto_raise_elapsed(handle),
        }
        true
    }
}
