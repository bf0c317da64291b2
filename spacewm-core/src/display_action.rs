use crate::models::{SubspaceEvent, WindowHandle};
use crate::tabbox::TabboxEvent;
use crate::utils::timers::TimerToken;
use serde::{Deserialize, Serialize};

/// These are responses from the arrangement engine.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction {
    /// Tell a window that it is to become focused.
    Activate(WindowHandle),

    /// Remove focus from any window.
    Unfocus,

    /// Sets the "z-index" order of the windows
    /// first in the array is top most
    SetWindowOrder(Vec<WindowHandle>),

    /// Map or unmap a window after a subspace or minimize change.
    SetVisible(WindowHandle, bool),

    SetShowingDesktop(bool),

    /// Call back into `timer_elapsed` with the token once the delay passed.
    StartTimer { token: TimerToken, delay_ms: u32 },

    StopTimer(TimerToken),

    Tabbox(TabboxEvent),

    Subspace(SubspaceEvent),
}
