#![allow(clippy::wildcard_imports)]

use super::*;
use crate::state::State;
use crate::tabbox::model::{desktop_candidates, window_candidates};
use crate::tabbox::shortcuts::{direction_for, Direction as WalkDirection};
use crate::tabbox::{Candidate, TabboxEvent, TabboxMode, WalkAction};
use crate::utils::modmask_lookup::{KeyCombo, KeySequence, ModMask};
use crate::utils::screen_edges::ElectricBorder;
use crate::utils::timers::TimerKind;

/// Milliseconds before a walk step is replayed after the mode changed.
const MODE_SWITCH_DELAY: u32 = 50;

impl State {
    /// Rebuild the switcher entries. A partial reset keeps the selection.
    pub(crate) fn tabbox_reset(&mut self, partial: bool) {
        let config = self.tabbox.config();
        let (candidates, seed) = if self.tabbox.mode().is_desktop_mode() {
            let list = desktop_candidates(config, &self.subspaces, &self.subspace_chain);
            let seed = Candidate::Subspace(self.subspaces.current_x11_id());
            (
                list.into_iter().map(Candidate::Subspace).collect::<Vec<_>>(),
                Some(seed),
            )
        } else {
            let list = window_candidates(config, &self.client_context());
            let seed = self
                .active_window()
                .or_else(|| self.focus_chain.first_most_recently_used())
                .map(Candidate::Window);
            (list.into_iter().map(Candidate::Window).collect(), seed)
        };
        tracing::trace!("Switcher holds {} entries", candidates.len());
        self.tabbox.set_candidates(candidates, seed, partial);
        self.emit_tabbox(TabboxEvent::Updated);
    }

    pub(crate) fn tabbox_next_prev(&mut self, forward: bool) {
        if !self.tabbox.step(forward) {
            return;
        }
        self.emit_tabbox(TabboxEvent::Updated);
        self.tabbox_highlight();
    }

    fn tabbox_highlight(&mut self) {
        let tabbox = &self.tabbox;
        if tabbox.is_shown() && tabbox.mode().is_window_mode() && tabbox.config().highlight_windows
        {
            let current = tabbox.current_window();
            self.emit_tabbox(TabboxEvent::Highlight(current));
        }
    }

    pub(crate) fn tabbox_hide(&mut self, abort: bool) {
        tracing::trace!("Hiding switcher, abort: {}", abort);
        if let Some(token) = self.tabbox.delayed_show.take() {
            self.stop_timer(token);
        }
        if self.tabbox.is_shown {
            if self.tabbox.config().highlight_windows && self.tabbox.mode().is_window_mode() {
                self.emit_tabbox(TabboxEvent::Highlight(None));
            }
            self.tabbox.is_shown = false;
            self.tabbox.unreference();
        }
        if self.tabbox.effect_shown {
            self.tabbox.effect_shown = false;
            self.tabbox.unreference();
        }
        self.emit_tabbox(TabboxEvent::Closed);
        if self.tabbox.is_displayed() {
            tracing::debug!("Switcher is still displayed after hiding it");
        }
    }

    /// Top most window of the direct raise walk and the one it moves to.
    /// Without a top most candidate the scan starts at the first window in
    /// creation order.
    fn direct_walk_target(&self, forward: bool) -> Option<(Option<WindowHandle>, WindowHandle)> {
        let current = self.subspaces.current_id();
        let top = self.stacking.top_down().find(|handle| {
            self.window(*handle).is_some_and(|w| {
                w.managed
                    && w.is_on_subspace(current)
                    && !w.is_special()
                    && w.is_shown()
                    && w.wants_tab_focus()
                    && !w.keep_above
                    && !w.keep_below
            })
        });
        let traverse_all = self.tabbox.settings.traverse_all;
        let skipped = |handle: WindowHandle| {
            self.window(handle).map_or(true, |w| {
                (!traverse_all && !w.is_on_subspace(current))
                    || w.is_minimized()
                    || !w.wants_tab_focus()
                    || w.keep_above
                    || w.keep_below
            })
        };

        let mut candidate = match top {
            Some(top) => self.step_static(top, forward)?,
            None => self.windows.first()?.handle,
        };
        let first = candidate;
        loop {
            if Some(candidate) == top || !skipped(candidate) {
                return Some((top, candidate));
            }
            candidate = self.step_static(candidate, forward)?;
            // every window was seen once
            if candidate == first {
                return None;
            }
        }
    }

    /// Neighbour in creation order, wrapping. An unknown reference starts
    /// over from the respective end.
    fn step_static(&self, reference: WindowHandle, forward: bool) -> Option<WindowHandle> {
        let windows = &self.windows;
        let first = windows.first()?.handle;
        let last = windows.last()?.handle;
        let Some(index) = windows.iter().position(|w| w.handle == reference) else {
            return Some(if forward { first } else { last });
        };
        Some(match (forward, index) {
            (true, i) if i + 1 == windows.len() => first,
            (true, i) => windows[i + 1].handle,
            (false, 0) => last,
            (false, i) => windows[i - 1].handle,
        })
    }
}

impl<SERVER: DisplayServer> Manager<SERVER> {
    fn establish_tabbox_grab(&mut self) -> bool {
        if !self.display_server.grab_keyboard() {
            tracing::debug!("Keyboard grab refused, not starting the switcher");
            return false;
        }
        true
    }

    fn shortcut_modifiers_held(&self, sequence: &KeySequence) -> bool {
        sequence
            .modifiers()
            .is_some_and(|mods| self.display_server.modifiers_held(mods))
    }

    /// Display the switcher, offering it to the display server first.
    pub fn tabbox_show(&mut self) {
        let mode = self.state.tabbox.mode();
        self.state.emit_tabbox(TabboxEvent::Added(mode));
        if !self.state.tabbox.effect_shown && self.display_server.tabbox_takeover(mode) {
            self.state.tabbox.reference();
            self.state.tabbox.effect_shown = true;
        }
        if self.state.tabbox.is_displayed() {
            self.state.tabbox.is_shown = false;
            return;
        }
        if !self.state.tabbox.config().show_tabbox || self.state.tabbox.candidates().is_empty() {
            return;
        }
        if self.state.showing_desktop {
            self.state.set_showing_desktop(false);
        }
        self.state.tabbox.reference();
        self.state.tabbox.is_shown = true;
        self.state.tabbox_highlight();
    }

    pub fn tabbox_delayed_show(&mut self) {
        let tabbox = &self.state.tabbox;
        if tabbox.is_displayed() || tabbox.delayed_show.is_some() {
            return;
        }
        let settings = &tabbox.settings;
        if !settings.delay_show || settings.delay_time == 0 {
            self.tabbox_show();
            return;
        }
        let delay = settings.delay_time;
        let token = self.state.start_timer(TimerKind::DelayedShow, delay);
        self.state.tabbox.delayed_show = Some(token);
    }

    pub fn tabbox_close(&mut self, abort: bool) {
        if self.state.tabbox.is_grabbed() {
            self.display_server.ungrab_keyboard();
        }
        if let Some(token) = self.state.tabbox.mode_switch.take() {
            self.state.stop_timer(token);
        }
        self.state.tabbox_hide(abort);
        self.state.tabbox.clear_grabs();
    }

    /// Activate the selected window.
    pub fn tabbox_accept(&mut self, close: bool) {
        let selected = self.state.tabbox.current_window();
        if close {
            self.tabbox_close(false);
        }
        let Some(handle) = selected else {
            return;
        };
        let is_desktop = self.state.window(handle).is_some_and(Window::is_desktop);
        self.activate_window(handle);
        if is_desktop {
            let showing = !self.state.showing_desktop;
            self.state.set_showing_desktop(showing);
        }
    }

    fn tabbox_commit_desktop(&mut self) {
        let desktop = self.state.tabbox.current_desktop();
        self.tabbox_close(false);
        if let Some(x11_id) = desktop {
            self.set_current_subspace(x11_id);
        }
    }

    /// The walk modifiers were let go.
    pub fn tabbox_modifiers_released(&mut self) {
        let tabbox = &self.state.tabbox;
        if tabbox.no_modifier_grab {
            return;
        }
        if tabbox.tab_grab {
            self.tabbox_accept(true);
        } else if tabbox.desktop_grab {
            self.tabbox_commit_desktop();
        }
    }

    /// Entry point of the walk shortcuts.
    pub fn walk(&mut self, action: WalkAction) {
        let mode = action.mode();
        if mode.is_desktop_mode() {
            self.walk_through_desktops(action.is_forward(), mode);
        } else {
            self.navigating_through_windows(action.is_forward(), mode);
        }
    }

    fn navigating_through_windows(&mut self, forward: bool, mode: TabboxMode) {
        if self.state.tabbox.is_grabbed() {
            return;
        }
        if !self.state.focus_options.policy.is_reasonable() {
            self.direct_walk_through_windows(forward);
            return;
        }
        let sequence = self.state.tabbox.shortcuts.get(WalkAction::for_mode(mode, forward));
        if self.shortcut_modifiers_held(sequence) {
            if self.start_walk_through_windows(mode) {
                self.state.tabbox_next_prev(forward);
                self.tabbox_delayed_show();
            }
        } else {
            self.one_step_through_windows(forward, mode);
        }
    }

    fn start_walk_through_windows(&mut self, mode: TabboxMode) -> bool {
        if !self.establish_tabbox_grab() {
            return false;
        }
        let tabbox = &mut self.state.tabbox;
        tabbox.tab_grab = true;
        tabbox.no_modifier_grab = false;
        tabbox.set_mode(mode);
        self.state.tabbox_reset(false);
        true
    }

    fn one_step_through_windows(&mut self, forward: bool, mode: TabboxMode) {
        self.state.tabbox.set_mode(mode);
        self.state.tabbox_reset(false);
        self.state.tabbox_next_prev(forward);
        if let Some(handle) = self.state.tabbox.current_window() {
            self.activate_window(handle);
        }
    }

    fn walk_through_desktops(&mut self, forward: bool, mode: TabboxMode) {
        if self.state.tabbox.is_grabbed() {
            return;
        }
        let sequence = self.state.tabbox.shortcuts.get(WalkAction::for_mode(mode, forward));
        if self.shortcut_modifiers_held(sequence) {
            if self.start_walk_through_desktops(mode) {
                self.state.tabbox_next_prev(forward);
                self.tabbox_delayed_show();
            }
        } else {
            self.state.tabbox.set_mode(mode);
            self.state.tabbox_reset(false);
            self.state.tabbox_next_prev(forward);
            if let Some(x11_id) = self.state.tabbox.current_desktop() {
                self.set_current_subspace(x11_id);
            }
        }
    }

    fn start_walk_through_desktops(&mut self, mode: TabboxMode) -> bool {
        if !self.establish_tabbox_grab() {
            return false;
        }
        let tabbox = &mut self.state.tabbox;
        tabbox.desktop_grab = true;
        tabbox.no_modifier_grab = false;
        tabbox.set_mode(mode);
        self.state.tabbox_reset(false);
        if self.state.tabbox.candidates().len() < 2 {
            tracing::debug!("Nothing to walk through, closing the switcher");
            self.tabbox_close(false);
            return false;
        }
        true
    }

    /// Raise the next window in creation order without showing the
    /// switcher, for focus policies where a walk would lose focus again.
    fn direct_walk_through_windows(&mut self, forward: bool) {
        let Some((top, next)) = self.state.direct_walk_target(forward) else {
            return;
        };
        self.state.lock_stacking();
        if let Some(top) = top.filter(|top| *top != next) {
            self.state.lower_window(top);
        }
        if self.state.focus_options.policy.is_reasonable() {
            self.activate_window(next);
        } else {
            let current = self.state.subspaces.current_id();
            let target = self
                .state
                .window(next)
                .filter(|w| !w.is_on_subspace(current))
                .and_then(|w| w.subspaces().last().copied())
                .and_then(|id| self.state.subspaces.x11_id_of(id));
            if let Some(x11_id) = target {
                self.set_current_subspace(x11_id);
            }
            self.state.raise_window(next);
        }
        self.state.unlock_stacking();
    }

    /// Handle a key while the switcher holds the keyboard.
    pub fn tabbox_key_press(&mut self, combo: &KeyCombo) {
        let tabbox = &self.state.tabbox;
        if tabbox.tab_grab {
            let current = tabbox.mode();
            let modes = TabboxMode::WINDOW_MODES;
            let start = modes.iter().position(|m| *m == current).unwrap_or(0);
            let matched = (0..modes.len())
                .map(|offset| modes[(start + offset) % modes.len()])
                .find_map(|mode| {
                    let shortcuts = &tabbox.shortcuts;
                    match direction_for(combo, shortcuts.forward(mode), shortcuts.backward(mode)) {
                        WalkDirection::Steady => None,
                        direction => Some((mode, direction == WalkDirection::Forward)),
                    }
                });
            if let Some((mode, forward)) = matched {
                if mode == current {
                    self.state.tabbox_next_prev(forward);
                    self.tabbox_delayed_show();
                } else {
                    self.switch_walk_mode(mode, forward);
                }
                return;
            }
        } else if tabbox.desktop_grab {
            let shortcuts = &tabbox.shortcuts;
            let direction = [TabboxMode::Desktop, TabboxMode::DesktopList]
                .into_iter()
                .map(|mode| direction_for(combo, shortcuts.forward(mode), shortcuts.backward(mode)))
                .find(|direction| *direction != WalkDirection::Steady);
            if let Some(direction) = direction {
                self.state.tabbox_next_prev(direction == WalkDirection::Forward);
                self.tabbox_delayed_show();
                return;
            }
        }
        if !self.state.tabbox.is_grabbed() {
            return;
        }
        if combo.is_key("Escape") {
            self.tabbox_close(true);
            return;
        }
        self.grabbed_key_event(combo);
    }

    /// Continue the walk in another mode once the switcher settled.
    fn switch_walk_mode(&mut self, mode: TabboxMode, forward: bool) {
        self.state.tabbox.set_mode(mode);
        if let Some(token) = self.state.tabbox.mode_switch.take() {
            self.state.stop_timer(token);
        }
        let token = self
            .state
            .start_timer(TimerKind::ModeSwitchSettle { forward }, MODE_SWITCH_DELAY);
        self.state.tabbox.mode_switch = Some(token);
    }

    pub(crate) fn mode_switch_settled(&mut self, forward: bool) {
        self.state.tabbox.mode_switch = None;
        if !self.state.tabbox.tab_grab {
            return;
        }
        self.state.tabbox_reset(false);
        self.state.tabbox_next_prev(forward);
        self.tabbox_delayed_show();
    }

    fn grabbed_key_event(&mut self, combo: &KeyCombo) {
        let bare = KeyCombo::new(ModMask::Zero, &combo.key);
        self.state.emit_tabbox(TabboxEvent::KeyEvent(bare.clone()));
        let tabbox = &self.state.tabbox;
        if !tabbox.is_shown() && tabbox.is_displayed() {
            // an effect drives the switcher
            return;
        }
        match bare.key.as_str() {
            "Left" | "Up" => self.state.tabbox_next_prev(false),
            "Right" | "Down" => self.state.tabbox_next_prev(true),
            "Return" | "Enter" | "Space" if tabbox.no_modifier_grab => {
                if tabbox.mode().is_desktop_mode() {
                    self.tabbox_commit_desktop();
                } else {
                    self.tabbox_accept(true);
                }
            }
            _ => {}
        }
    }

    /// Screen edge activation.
    pub fn tabbox_toggle(&mut self, edge: ElectricBorder) -> bool {
        let alternative = self
            .state
            .tabbox
            .settings
            .border_alternative_activate
            .contains(&edge);
        self.tabbox_toggle_mode(if alternative {
            TabboxMode::WindowsAlternative
        } else {
            TabboxMode::Windows
        })
    }

    pub fn tabbox_touch_toggle(&mut self, edge: ElectricBorder) -> bool {
        let alternative = self
            .state
            .tabbox
            .settings
            .touch_border_alternative_activate
            .contains(&edge);
        self.tabbox_toggle_mode(if alternative {
            TabboxMode::WindowsAlternative
        } else {
            TabboxMode::Windows
        })
    }

    /// Open a switcher that stays until an entry is picked, or accept the
    /// selection of the one already displayed.
    pub fn tabbox_toggle_mode(&mut self, mode: TabboxMode) -> bool {
        if !self.state.focus_options.policy.is_reasonable() {
            return false;
        }
        if self.state.tabbox.is_displayed() {
            self.tabbox_accept(true);
            return true;
        }
        if !self.establish_tabbox_grab() {
            return false;
        }
        let tabbox = &mut self.state.tabbox;
        tabbox.no_modifier_grab = true;
        tabbox.tab_grab = true;
        tabbox.set_mode(mode);
        self.state.tabbox_reset(false);
        self.tabbox_show();
        true
    }

    /// Pointer button press while the switcher is grabbed. Returns whether
    /// the event was consumed.
    pub fn tabbox_pointer_press(&mut self, x: i32, y: i32) -> bool {
        if !self.state.tabbox.is_grabbed() {
            return false;
        }
        let tabbox = &self.state.tabbox;
        let taken_over = !tabbox.is_shown() && tabbox.is_displayed();
        if taken_over || !self.display_server.switcher_contains(x, y) {
            self.tabbox_close(false);
            return true;
        }
        false
    }

    /// Pointer motion off the switcher is filtered out.
    pub fn tabbox_pointer_motion(&self, x: i32, y: i32) -> bool {
        self.state.tabbox.is_grabbed() && !self.display_server.switcher_contains(x, y)
    }

    /// Scrolling up selects the previous entry.
    pub fn tabbox_wheel(&mut self, delta: i32) -> bool {
        if !self.state.tabbox.is_grabbed() {
            return false;
        }
        if delta == 0 {
            return false;
        }
        self.state.tabbox_next_prev(delta < 0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FocusPolicy;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Rect, WindowType};

    fn alt_tab() -> KeyCombo {
        KeyCombo::new(ModMask::Alt, "Tab")
    }

    fn manager_with_windows(handles: &[u32]) -> Manager<MockDisplayServer> {
        let mut manager = Manager::new_test(2);
        for handle in handles {
            manager.window_created(Window::new(WindowHandle(*handle), None), true);
        }
        manager.state.take_actions();
        manager
    }

    fn tabbox_events(manager: &mut Manager<MockDisplayServer>) -> Vec<TabboxEvent> {
        manager
            .state
            .take_actions()
            .into_iter()
            .filter_map(|action| match action {
                DisplayAction::Tabbox(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    fn started_timers(actions: &[DisplayAction]) -> Vec<(crate::utils::timers::TimerToken, u32)> {
        actions
            .iter()
            .filter_map(|action| match action {
                DisplayAction::StartTimer { token, delay_ms } => Some((*token, *delay_ms)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn held_modifiers_start_a_walk_with_a_delayed_show() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);

        let tabbox = &manager.state.tabbox;
        assert!(tabbox.is_grabbed());
        assert!(manager.display_server.grabbed);
        assert_eq!(
            tabbox.candidates(),
            [3, 2, 1].map(|h| Candidate::Window(WindowHandle(h)))
        );
        assert_eq!(tabbox.current_window(), Some(WindowHandle(2)));
        assert!(!tabbox.is_displayed());
        let token = tabbox.delayed_show.unwrap();
        assert_eq!(
            started_timers(&manager.state.take_actions()),
            [(token, 90)]
        );

        assert!(manager.timer_elapsed(token));
        assert!(manager.state.tabbox.is_shown());
        assert!(manager.state.tabbox.is_displayed());

        manager.tabbox_modifiers_released();
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(!manager.state.tabbox.is_displayed());
        assert!(!manager.display_server.grabbed);
        assert_eq!(manager.state.active_window(), Some(WindowHandle(2)));
    }

    #[test]
    fn a_walk_committed_before_the_delay_never_shows() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        let token = manager.state.tabbox.delayed_show.unwrap();
        manager.tabbox_modifiers_released();
        assert!(manager.state.actions.contains(&DisplayAction::StopTimer(token)));
        assert!(!manager.timer_elapsed(token));
        assert!(!manager.state.tabbox.is_displayed());
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn without_modifiers_a_walk_steps_once() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.walk(WalkAction::Windows);
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(!manager.display_server.grabbed);
        assert_eq!(manager.state.active_window(), Some(WindowHandle(2)));

        manager.walk(WalkAction::WindowsReverse);
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn refused_grab_leaves_the_switcher_idle() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.display_server.held = ModMask::Alt;
        manager.display_server.allow_grab = false;
        manager.walk(WalkAction::Windows);
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(manager.state.tabbox.candidates().is_empty());
        assert_eq!(manager.state.active_window(), Some(WindowHandle(2)));
        assert!(tabbox_events(&mut manager).is_empty());
    }

    #[test]
    fn an_empty_walk_is_never_displayed() {
        let mut manager = Manager::new_test(1);
        manager.state.tabbox.settings.delay_show = false;
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        assert!(manager.state.tabbox.is_grabbed());
        assert!(!manager.state.tabbox.is_displayed());
        assert!(!manager.state.tabbox.is_shown());
        assert_eq!(
            tabbox_events(&mut manager),
            [TabboxEvent::Updated, TabboxEvent::Added(TabboxMode::Windows)]
        );
    }

    #[test]
    fn an_effect_can_take_the_switcher_over() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.state.tabbox.settings.delay_show = false;
        manager.display_server.held = ModMask::Alt;
        manager.display_server.takeover = true;
        manager.walk(WalkAction::Windows);
        assert!(manager.state.tabbox.is_displayed());
        assert!(!manager.state.tabbox.is_shown());

        // arrows belong to the effect now
        manager.state.take_actions();
        manager.tabbox_key_press(&KeyCombo::new(ModMask::Alt, "Right"));
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(1)));
        assert_eq!(
            tabbox_events(&mut manager),
            [TabboxEvent::KeyEvent(KeyCombo::new(ModMask::Zero, "Right"))]
        );

        assert!(manager.tabbox_pointer_press(5, 5));
        assert!(!manager.state.tabbox.is_grabbed());
    }

    #[test]
    fn showing_the_switcher_leaves_show_desktop() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.state.tabbox.settings.delay_show = false;
        manager.state.set_showing_desktop(true);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        assert!(manager.state.tabbox.is_shown());
        assert!(!manager.state.showing_desktop);
    }

    #[test]
    fn stale_delayed_show_is_ignored() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        let token = manager.state.tabbox.delayed_show.unwrap();
        manager.tabbox_close(true);
        assert!(!manager.timer_elapsed(token));
        assert!(!manager.state.tabbox.is_displayed());
    }

    #[test]
    fn key_press_prefers_the_active_mode() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        manager
            .state
            .tabbox
            .shortcuts
            .set(WalkAction::WindowsAlternative, KeySequence::new(vec![alt_tab()]));

        manager.tabbox_key_press(&alt_tab());
        assert_eq!(manager.state.tabbox.mode(), TabboxMode::Windows);
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(1)));

        manager.tabbox_key_press(&KeyCombo::new(ModMask::Alt | ModMask::Shift, "Tab"));
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(2)));
    }

    #[test]
    fn switching_mode_defers_the_step() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        manager.state.take_actions();
        let quote_left = KeyCombo::new(ModMask::Alt, "QuoteLeft");

        manager.tabbox_key_press(&quote_left);
        assert_eq!(manager.state.tabbox.mode(), TabboxMode::CurrentAppWindows);
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(2)));
        assert!(manager.state.tabbox.is_grabbed());
        let timers = started_timers(&manager.state.take_actions());
        assert_eq!(timers.len(), 1);
        let (token, delay) = timers[0];
        assert_eq!(delay, MODE_SWITCH_DELAY);

        assert!(manager.timer_elapsed(token));
        // only windows of the active application remain
        assert_eq!(
            manager.state.tabbox.candidates(),
            [Candidate::Window(WindowHandle(3))]
        );
        assert!(!manager.timer_elapsed(token));
    }

    #[test]
    fn escape_aborts_the_walk() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        manager.tabbox_key_press(&KeyCombo::new(ModMask::Alt, "Escape"));
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(!manager.display_server.grabbed);
        assert_eq!(manager.state.active_window(), Some(WindowHandle(2)));
        assert!(tabbox_events(&mut manager).contains(&TabboxEvent::Closed));
    }

    #[test]
    fn desktop_walk_commits_on_release() {
        let mut manager = Manager::new_test(3);
        let ctrl_tab = KeyCombo::new(ModMask::Control, "Tab");
        manager
            .state
            .tabbox
            .shortcuts
            .set(WalkAction::Desktops, KeySequence::new(vec![ctrl_tab.clone()]));
        manager.display_server.held = ModMask::Control;

        manager.walk(WalkAction::Desktops);
        assert!(manager.state.tabbox.is_grabbed());
        assert_eq!(manager.state.tabbox.current_desktop(), Some(2));
        manager.tabbox_key_press(&ctrl_tab);
        assert_eq!(manager.state.tabbox.current_desktop(), Some(3));

        manager.tabbox_modifiers_released();
        assert!(!manager.state.tabbox.is_grabbed());
        assert_eq!(manager.state.subspaces.current_x11_id(), 3);
        assert_eq!(manager.state.subspace_chain.as_slice()[0], 3);
    }

    #[test]
    fn desktop_walk_with_one_subspace_closes() {
        let mut manager = Manager::new_test(1);
        manager.state.tabbox.shortcuts.set(
            WalkAction::Desktops,
            KeySequence::new(vec![KeyCombo::new(ModMask::Control, "Tab")]),
        );
        manager.display_server.held = ModMask::Control;
        manager.walk(WalkAction::Desktops);
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(!manager.display_server.grabbed);
        assert!(tabbox_events(&mut manager).contains(&TabboxEvent::Closed));
    }

    #[test]
    fn one_step_desktop_walk_switches_at_once() {
        let mut manager = Manager::new_test(3);
        manager.walk(WalkAction::DesktopListReverse);
        assert_eq!(manager.state.subspaces.current_x11_id(), 3);
        assert!(!manager.state.tabbox.is_grabbed());
    }

    #[test]
    fn direct_walk_raises_in_creation_order() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.state.focus_options.policy = FocusPolicy::FocusUnderMouse;
        let mut minimized = Window::new(WindowHandle(4), None);
        minimized.set_minimized(true);
        manager.window_created(minimized, false);
        manager.state.raise_window(WindowHandle(3));
        manager.state.take_actions();

        manager.walk(WalkAction::Windows);
        assert!(!manager.state.tabbox.is_grabbed());
        // 4 is skipped, the walk wraps to 1
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(1)));
        assert_eq!(manager.state.stacking.as_slice()[0], WindowHandle(3));
        let orders = manager
            .state
            .take_actions()
            .into_iter()
            .filter(|a| matches!(a, DisplayAction::SetWindowOrder(_)))
            .count();
        assert_eq!(orders, 1);
    }

    #[test]
    fn direct_walk_skips_windows_kept_above_or_below() {
        let mut manager = manager_with_windows(&[1, 2, 3, 4]);
        manager.state.focus_options.policy = FocusPolicy::FocusUnderMouse;
        manager.state.window_mut(WindowHandle(2)).unwrap().keep_above = true;
        manager.state.window_mut(WindowHandle(3)).unwrap().keep_below = true;
        manager.state.raise_window(WindowHandle(1));
        manager.state.take_actions();

        manager.walk(WalkAction::Windows);
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(4)));
        assert!(!manager.state.tabbox.is_grabbed());
    }

    #[test]
    fn direct_walk_follows_windows_to_other_subspaces() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.state.focus_options.policy = FocusPolicy::FocusUnderMouse;
        manager.state.send_to_subspace(WindowHandle(2), 2);
        manager.state.tabbox.settings.traverse_all = true;
        manager.state.take_actions();

        manager.walk(WalkAction::Windows);
        assert_eq!(manager.state.subspaces.current_x11_id(), 2);
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(2)));
    }

    #[test]
    fn direct_walk_without_a_top_window_starts_at_the_first_one() {
        let mut manager = manager_with_windows(&[1]);
        manager.state.focus_options.policy = FocusPolicy::FocusUnderMouse;
        manager.state.send_to_subspace(WindowHandle(1), 2);
        manager.state.take_actions();

        // nothing to walk to on this subspace
        manager.walk(WalkAction::Windows);
        assert_eq!(manager.state.subspaces.current_x11_id(), 1);
        assert!(manager.state.take_actions().is_empty());

        manager.state.tabbox.settings.traverse_all = true;
        manager.walk(WalkAction::Windows);
        assert_eq!(manager.state.subspaces.current_x11_id(), 2);
        assert_eq!(manager.state.stacking.top(), Some(WindowHandle(1)));
    }

    #[test]
    fn an_effect_walk_leaves_the_next_switcher_native() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.state.tabbox.settings.delay_show = false;
        manager.display_server.held = ModMask::Alt;
        manager.display_server.takeover = true;
        manager.walk(WalkAction::Windows);
        assert!(manager.state.tabbox.is_displayed());
        manager.tabbox_modifiers_released();
        assert!(!manager.state.tabbox.is_displayed());

        manager.display_server.takeover = false;
        manager.walk(WalkAction::Windows);
        assert!(manager.state.tabbox.is_shown());
        manager.tabbox_close(true);
        assert!(!manager.state.tabbox.is_displayed());

        // a hidden switcher opens instead of accepting
        assert!(manager.tabbox_toggle_mode(TabboxMode::Windows));
        assert!(manager.state.tabbox.is_grabbed());
        assert!(manager.state.tabbox.is_shown());
    }

    #[test]
    fn edge_toggle_opens_and_accepts() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.state.tabbox.settings.border_alternative_activate = vec![ElectricBorder::Left];
        assert!(manager.tabbox_toggle(ElectricBorder::Left));
        assert_eq!(manager.state.tabbox.mode(), TabboxMode::WindowsAlternative);
        assert!(manager.state.tabbox.is_shown());
        assert!(manager.state.tabbox.has_no_modifier_grab());

        manager.tabbox_modifiers_released();
        assert!(manager.state.tabbox.is_grabbed());

        manager.tabbox_key_press(&KeyCombo::new(ModMask::Zero, "Right"));
        manager.tabbox_key_press(&KeyCombo::new(ModMask::Zero, "Return"));
        assert!(!manager.state.tabbox.is_grabbed());
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn edge_toggle_needs_a_reasonable_policy() {
        let mut manager = manager_with_windows(&[1]);
        manager.state.focus_options.policy = FocusPolicy::FocusStrictlyUnderMouse;
        assert!(!manager.tabbox_touch_toggle(ElectricBorder::Top));
        assert!(!manager.state.tabbox.is_grabbed());
    }

    #[test]
    fn accepting_the_desktop_window_toggles_show_desktop() {
        let mut manager = Manager::new_test(1);
        let mut desktop = Window::new(WindowHandle(1), None);
        desktop.r#type = WindowType::Desktop;
        manager.window_created(desktop, false);
        assert!(manager.tabbox_toggle_mode(TabboxMode::Windows));
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(1)));
        assert!(manager.tabbox_toggle_mode(TabboxMode::Windows));
        assert!(manager.state.showing_desktop);
    }

    #[test]
    fn pointer_outside_the_switcher_closes_it() {
        let mut manager = manager_with_windows(&[1, 2]);
        manager.display_server.switcher = Some(Rect::new(100, 100, 200, 100));
        assert!(manager.tabbox_toggle_mode(TabboxMode::Windows));
        assert!(!manager.tabbox_pointer_motion(150, 150));
        assert!(manager.tabbox_pointer_motion(10, 10));
        assert!(!manager.tabbox_pointer_press(150, 150));

        assert!(manager.tabbox_wheel(-120));
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(1)));
        assert!(!manager.tabbox_wheel(0));

        assert!(manager.tabbox_pointer_press(10, 10));
        assert!(!manager.state.tabbox.is_grabbed());
        assert!(!manager.tabbox_wheel(120));
    }

    #[test]
    fn reset_keeps_the_selection_when_windows_come_and_go() {
        let mut manager = manager_with_windows(&[1, 2, 3]);
        manager.display_server.held = ModMask::Alt;
        manager.walk(WalkAction::Windows);
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(2)));
        manager.window_created(Window::new(WindowHandle(4), None), false);
        assert_eq!(manager.state.tabbox.candidates().len(), 4);
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(2)));
        manager.window_destroyed(WindowHandle(3));
        assert_eq!(manager.state.tabbox.current_window(), Some(WindowHandle(2)));
    }
}
