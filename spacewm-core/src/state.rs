//! Session state shared by every handler.

use crate::config::{ConfigStore, FocusOptions};
use crate::models::{
    FocusChain, Output, OutputId, StackingOrder, SubspaceChain, SubspaceId, SubspaceManager,
    Window, WindowHandle,
};
use crate::tabbox::model::ClientContext;
use crate::tabbox::{Tabbox, TabboxEvent, TabboxSettings, WalkAction};
use crate::utils::global_shortcuts::ShortcutRegistry;
use crate::utils::screen_edges::ScreenEdges;
use crate::utils::timers::{TimerKind, TimerToken, Timers};
use crate::DisplayAction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Serialize, Deserialize, Debug)]
pub struct State {
    pub subspaces: SubspaceManager,
    pub subspace_chain: SubspaceChain,
    pub focus_chain: FocusChain,
    /// Managed windows in creation order.
    pub windows: Vec<Window>,
    pub stacking: StackingOrder,
    pub outputs: Vec<Output>,
    pub active_output: Option<OutputId>,
    pub focus_options: FocusOptions,
    pub tabbox: Tabbox,
    pub shortcuts: ShortcutRegistry,
    pub screen_edges: ScreenEdges,
    pub timers: Timers,
    pub showing_desktop: bool,
    pub actions: VecDeque<DisplayAction>,
    pub(crate) block_focus: u32,
    pub(crate) auto_raise: Option<TimerToken>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        let subspaces = SubspaceManager::new();
        let mut focus_chain = FocusChain::new(&[subspaces.current_id()]);
        focus_chain.set_current_subspace(subspaces.current_id());
        let mut state = Self {
            subspace_chain: SubspaceChain::new(subspaces.count()),
            subspaces,
            focus_chain,
            windows: Default::default(),
            stacking: Default::default(),
            outputs: Default::default(),
            active_output: None,
            focus_options: FocusOptions::default(),
            tabbox: Tabbox::default(),
            shortcuts: ShortcutRegistry::default(),
            screen_edges: ScreenEdges::default(),
            timers: Timers::default(),
            showing_desktop: false,
            actions: Default::default(),
            block_focus: 0,
            auto_raise: None,
        };
        state.register_walk_shortcuts();
        state
    }

    /// Restore the persisted subspaces and apply the configuration.
    pub fn load(&mut self, store: &impl ConfigStore) {
        self.subspaces.load(store);
        self.reconfigure(store);
    }

    /// Re-read everything that may change at runtime.
    pub fn reconfigure(&mut self, store: &impl ConfigStore) {
        self.focus_options = FocusOptions::load(store);
        self.focus_chain.separate_screen_focus = self.focus_options.separate_screen_focus;
        self.subspaces
            .set_navigation_wrapping(self.focus_options.roll_over_desktops);
        self.subspaces.reload_rows(store);
        self.process_subspace_events();

        let settings = TabboxSettings::load(store);
        self.reserve_borders(&settings);
        self.tabbox.settings = settings;
        tracing::debug!("Reconfigured, {} subspaces", self.subspaces.count());
    }

    fn reserve_borders(&mut self, settings: &TabboxSettings) {
        let old = &self.tabbox.settings;
        for border in old
            .border_activate
            .iter()
            .chain(&old.border_alternative_activate)
        {
            self.screen_edges.unreserve(*border);
        }
        for border in old
            .touch_border_activate
            .iter()
            .chain(&old.touch_border_alternative_activate)
        {
            self.screen_edges.unreserve_touch(*border);
        }
        for border in settings
            .border_activate
            .iter()
            .chain(&settings.border_alternative_activate)
        {
            self.screen_edges.reserve(*border);
        }
        for border in settings
            .touch_border_activate
            .iter()
            .chain(&settings.touch_border_alternative_activate)
        {
            self.screen_edges.reserve_touch(*border);
        }
    }

    fn register_walk_shortcuts(&mut self) {
        for action in WalkAction::ALL {
            let sequence = self
                .shortcuts
                .register(action.name(), action.default_shortcut());
            self.tabbox.shortcuts.set(action, sequence);
        }
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    pub(crate) fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    pub fn active_window(&self) -> Option<WindowHandle> {
        self.focus_chain.active_window()
    }

    pub(crate) fn subspace_ids(&self) -> Vec<SubspaceId> {
        self.subspaces.subspaces().iter().map(|s| s.id).collect()
    }

    pub(crate) fn client_context(&self) -> ClientContext {
        ClientContext {
            windows: &self.windows,
            focus_chain: &self.focus_chain,
            stacking: &self.stacking,
            current_subspace: self.subspaces.current_id(),
            active_window: self.focus_chain.active_window(),
            active_output: self.active_output,
        }
    }

    pub(crate) fn emit_tabbox(&mut self, event: TabboxEvent) {
        self.actions.push_back(DisplayAction::Tabbox(event));
    }

    pub(crate) fn start_timer(&mut self, kind: TimerKind, delay_ms: u32) -> TimerToken {
        let token = self.timers.start(kind);
        self.actions
            .push_back(DisplayAction::StartTimer { token, delay_ms });
        token
    }

    pub(crate) fn stop_timer(&mut self, token: TimerToken) {
        if self.timers.stop(token) {
            self.actions.push_back(DisplayAction::StopTimer(token));
        }
    }

    /// Publish the stacking order unless the ordering lock defers it.
    pub(crate) fn stacking_changed(&mut self) {
        if self.stacking.changed() {
            self.push_window_order();
        }
    }

    pub fn lock_stacking(&mut self) {
        self.stacking.lock();
    }

    pub fn unlock_stacking(&mut self) {
        if self.stacking.unlock() {
            self.push_window_order();
        }
    }

    fn push_window_order(&mut self) {
        let order = self.stacking.top_down().collect();
        self.actions.push_back(DisplayAction::SetWindowOrder(order));
    }
}

#[cfg(test)]
impl State {
    pub(crate) fn new_test(count: u32) -> Self {
        let mut state = Self::new();
        state.subspaces.set_count(count);
        state.process_subspace_events();
        state.actions.clear();
        state
    }

    pub(crate) fn take_actions(&mut self) -> Vec<DisplayAction> {
        self.actions.drain(..).collect()
    }
}
