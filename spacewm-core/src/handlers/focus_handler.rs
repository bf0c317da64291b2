#![allow(clippy::wildcard_imports)]

use super::*;
use crate::config::FocusPolicy;
use crate::state::State;
use crate::utils::timers::TimerKind;

impl State {
    /// Create a `DisplayAction` to cause this window to become focused.
    pub fn focus_window(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.window(handle) else {
            return false;
        };
        if self.focus_chain.active_window() == Some(handle) {
            return false;
        }
        let window = window.clone();
        self.focus_chain.set_active_window(Some(handle));
        self.focus_chain.update(&window, ChainChange::MakeFirst);
        self.actions.push_back(DisplayAction::Activate(handle));
        true
    }

    pub fn unfocus(&mut self) {
        if self.focus_chain.active_window().is_none() {
            return;
        }
        self.focus_chain.set_active_window(None);
        self.actions.push_back(DisplayAction::Unfocus);
    }

    pub fn raise_window(&mut self, handle: WindowHandle) -> bool {
        if !self.stacking.raise(handle) {
            return false;
        }
        self.stacking_changed();
        true
    }

    pub fn lower_window(&mut self, handle: WindowHandle) -> bool {
        if !self.stacking.lower(handle) {
            return false;
        }
        self.stacking_changed();
        true
    }

    pub fn set_showing_desktop(&mut self, value: bool) {
        if self.showing_desktop == value {
            return;
        }
        tracing::debug!("Showing desktop: {}", value);
        self.showing_desktop = value;
        self.actions
            .push_back(DisplayAction::SetShowingDesktop(value));
    }

    /// Raise `handle` once the auto raise interval passed, replacing any
    /// raise still pending.
    pub(crate) fn schedule_auto_raise(&mut self, handle: WindowHandle) {
        self.cancel_auto_raise();
        let interval = self.focus_options.auto_raise_interval;
        let token = self.start_timer(TimerKind::AutoRaise(handle), interval);
        self.auto_raise = Some(token);
    }

    pub(crate) fn cancel_auto_raise(&mut self) {
        if let Some(token) = self.auto_raise.take() {
            self.stop_timer(token);
        }
    }

    pub(crate) fn auto_raise_elapsed(&mut self, handle: WindowHandle) {
        self.auto_raise = None;
        if self.active_window() == Some(handle) {
            self.raise_window(handle);
        }
    }
}

impl<SERVER: DisplayServer> Manager<SERVER> {
    /// Bring a window to the user: switch to its subspace, unminimize,
    /// raise and focus it.
    pub fn activate_window(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.state.window(handle) else {
            return false;
        };
        let current = self.state.subspaces.current_id();
        if !window.is_on_subspace(current) {
            let target = window
                .subspaces()
                .last()
                .and_then(|id| self.state.subspaces.x11_id_of(*id));
            if let Some(x11_id) = target {
                self.state.block_focus += 1;
                self.set_current_subspace(x11_id);
                self.state.block_focus -= 1;
            }
        }
        self.state.set_minimized(handle, false);

        let options = self.state.focus_options;
        if options.auto_raise && options.policy != FocusPolicy::ClickToFocus {
            self.state.schedule_auto_raise(handle);
        } else {
            self.state.cancel_auto_raise();
            self.state.raise_window(handle);
        }
        self.state.focus_window(handle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_servers::MockDisplayServer;

    fn manager_with_windows(count: u32, handles: &[u32]) -> Manager<MockDisplayServer> {
        let mut manager = Manager::new_test(count);
        for handle in handles {
            manager.window_created(Window::new(WindowHandle(*handle), None), false);
        }
        manager.state.take_actions();
        manager
    }

    #[test]
    fn focusing_makes_the_window_most_recent() {
        let mut manager = manager_with_windows(1, &[1, 2]);
        assert!(manager.state.focus_window(WindowHandle(1)));
        assert!(!manager.state.focus_window(WindowHandle(1)));
        assert_eq!(manager.state.focus_chain.first_most_recently_used(), Some(WindowHandle(1)));
        assert_eq!(
            manager.state.take_actions(),
            [DisplayAction::Activate(WindowHandle(1))]
        );
    }

    #[test]
    fn focusing_an_unknown_window_does_nothing() {
        let mut manager = manager_with_windows(1, &[]);
        assert!(!manager.state.focus_window(WindowHandle(9)));
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn unfocus_is_only_reported_once() {
        let mut manager = manager_with_windows(1, &[1]);
        manager.state.focus_window(WindowHandle(1));
        manager.state.take_actions();
        manager.state.unfocus();
        manager.state.unfocus();
        assert_eq!(manager.state.take_actions(), [DisplayAction::Unfocus]);
    }

    #[test]
    fn raise_publishes_top_most_first() {
        let mut manager = manager_with_windows(1, &[1, 2, 3]);
        assert!(manager.state.raise_window(WindowHandle(1)));
        assert!(!manager.state.raise_window(WindowHandle(1)));
        assert_eq!(
            manager.state.take_actions(),
            [DisplayAction::SetWindowOrder(vec![
                WindowHandle(1),
                WindowHandle(3),
                WindowHandle(2)
            ])]
        );
    }

    #[test]
    fn showing_desktop_only_reports_changes() {
        let mut manager = manager_with_windows(1, &[]);
        manager.state.set_showing_desktop(false);
        manager.state.set_showing_desktop(true);
        manager.state.set_showing_desktop(true);
        assert_eq!(
            manager.state.take_actions(),
            [DisplayAction::SetShowingDesktop(true)]
        );
    }

    #[test]
    fn activating_switches_to_the_windows_subspace() {
        let mut manager = manager_with_windows(2, &[]);
        let second = manager.state.subspaces.subspace(2).map(|s| s.id).unwrap();
        let mut window = Window::new(WindowHandle(1), None);
        window.set_subspaces(vec![second]);
        manager.window_created(window, false);
        manager.state.set_minimized(WindowHandle(1), true);

        assert!(manager.activate_window(WindowHandle(1)));
        assert_eq!(manager.state.subspaces.current_x11_id(), 2);
        let window = manager.state.window(WindowHandle(1)).unwrap();
        assert!(!window.is_minimized());
        assert!(window.visible());
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(1)));
    }

    #[test]
    fn auto_raise_waits_for_the_interval() {
        let mut manager = manager_with_windows(1, &[1, 2]);
        manager.state.focus_options.auto_raise = true;
        manager.state.focus_options.policy = FocusPolicy::FocusFollowsMouse;

        manager.activate_window(WindowHandle(1));
        let first = manager.state.auto_raise.unwrap();
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(2)));

        manager.activate_window(WindowHandle(2));
        assert!(!manager.state.timers.is_pending(first));
        let second = manager.state.auto_raise.unwrap();
        assert!(manager.state.actions.contains(&DisplayAction::StopTimer(first)));

        assert!(!manager.timer_elapsed(first));
        manager.state.raise_window(WindowHandle(1));
        assert!(manager.timer_elapsed(second));
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(2)));
    }

    #[test]
    fn click_to_focus_raises_at_once() {
        let mut manager = manager_with_windows(1, &[1, 2]);
        manager.state.focus_options.auto_raise = true;
        manager.activate_window(WindowHandle(1));
        assert!(manager.state.auto_raise.is_none());
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(1)));
    }
}
