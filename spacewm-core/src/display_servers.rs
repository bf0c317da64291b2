#[cfg(test)]
mod mock_display_server;

use crate::display_action::DisplayAction;
use crate::models::GridCoords;
use crate::tabbox::TabboxMode;
use crate::utils::modmask_lookup::ModMask;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The compositor or X server side of a session.
pub trait DisplayServer {
    /// Grab the keyboard for a switcher walk. Returns false if refused.
    fn grab_keyboard(&mut self) -> bool;

    fn ungrab_keyboard(&mut self);

    /// Whether all of `modifiers` are currently held down.
    fn modifiers_held(&self, modifiers: ModMask) -> bool;

    /// Offer an effect the chance to display the switcher. Returning true
    /// means the effect displays it and native UI is suppressed.
    fn tabbox_takeover(&mut self, _mode: TabboxMode) -> bool {
        false
    }

    /// Whether a global position lies on the native switcher.
    fn switcher_contains(&self, _x: i32, _y: i32) -> bool {
        false
    }

    /// Consulted before the current subspace changes, returning false
    /// cancels the switch.
    fn allow_subspace_change(&mut self, _previous: u32, _offset: GridCoords) -> bool {
        true
    }

    fn execute_action(&mut self, _act: DisplayAction) {}
}
