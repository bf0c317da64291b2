use super::{ChainChange, DisplayAction, DisplayServer, Manager, SubspaceId, Window, WindowHandle};
use crate::models::{nearest_output, Output, OutputId, Rect};
use crate::state::State;

impl<SERVER: DisplayServer> Manager<SERVER> {
    /// Start managing a window, optionally activating it.
    /// Returns false if the window is already known.
    pub fn window_created(&mut self, window: Window, activate: bool) -> bool {
        let handle = window.handle;
        if !self.state.insert_window(window) {
            return false;
        }
        if activate {
            self.activate_window(handle);
        }
        true
    }

    pub fn window_destroyed(&mut self, handle: WindowHandle) -> bool {
        self.state.remove_window(handle).is_some()
    }
}

impl State {
    fn insert_window(&mut self, mut window: Window) -> bool {
        //don't add the window if we already know about it
        if self.window(window.handle).is_some() {
            tracing::warn!("Window {:?} is already managed", window.handle);
            return false;
        }
        if window.is_on_all_subspaces() && !window.is_special() {
            window.set_subspaces(vec![self.subspaces.current_id()]);
        }
        window.output = self.output_for(&window.geometry);
        tracing::debug!("Managing window {:?} ({:?})", window.handle, window.name);

        let handle = window.handle;
        self.focus_chain.update(&window, ChainChange::Update);
        self.windows.push(window);
        if self.stacking.push(handle) {
            self.stacking_changed();
        }
        self.update_visibility();
        if self.tabbox.is_grabbed() {
            self.tabbox_reset(true);
        }
        true
    }

    fn remove_window(&mut self, handle: WindowHandle) -> Option<Window> {
        let index = self.windows.iter().position(|w| w.handle == handle)?;
        let was_active = self.active_window() == Some(handle);
        let next = if was_active && self.block_focus == 0 {
            self.focus_chain.next_for_desktop(
                Some(handle),
                self.subspaces.current_id(),
                self.active_output,
                &self.windows,
            )
        } else {
            None
        };
        if was_active {
            self.cancel_auto_raise();
        }

        let window = self.windows.remove(index);
        self.focus_chain.remove(handle);
        if self.stacking.remove(handle) {
            self.stacking_changed();
        }
        if let Some(next) = next {
            self.focus_window(next);
        } else if was_active {
            self.actions.push_back(DisplayAction::Unfocus);
        }
        if self.tabbox.is_grabbed() {
            self.tabbox_reset(true);
        }
        Some(window)
    }

    /// Add `subspace` to the window's memberships.
    pub fn enter_subspace(&mut self, handle: WindowHandle, subspace: SubspaceId) -> bool {
        if self.subspaces.subspace_by_id(subspace).is_none() {
            return false;
        }
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if !window.enter(subspace) {
            return false;
        }
        self.membership_changed(handle);
        true
    }

    /// Drop `subspace` from the window's memberships. A window never leaves
    /// its last subspace.
    pub fn leave_subspace(&mut self, handle: WindowHandle, subspace: SubspaceId) -> bool {
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if !window.leave(subspace) {
            return false;
        }
        self.membership_changed(handle);
        true
    }

    pub fn set_on_all_subspaces(&mut self, handle: WindowHandle, on_all: bool) -> bool {
        let current = self.subspaces.current_id();
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if window.is_on_all_subspaces() == on_all {
            return false;
        }
        window.set_subspaces(if on_all { vec![] } else { vec![current] });
        self.membership_changed(handle);
        true
    }

    /// Make the window a member of exactly the subspace at `x11_id`.
    pub fn send_to_subspace(&mut self, handle: WindowHandle, x11_id: u32) -> bool {
        let Some(target) = self.subspaces.subspace(x11_id).map(|s| s.id) else {
            return false;
        };
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if window.subspaces() == [target] {
            return false;
        }
        window.set_subspaces(vec![target]);
        self.membership_changed(handle);
        true
    }

    fn membership_changed(&mut self, handle: WindowHandle) {
        if let Some(window) = self.window(handle).cloned() {
            self.focus_chain.update(&window, ChainChange::Update);
        }
        self.update_visibility();
        self.refocus_if_hidden(handle);
    }

    pub fn set_minimized(&mut self, handle: WindowHandle, minimized: bool) -> bool {
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if window.is_minimized() == minimized {
            return false;
        }
        window.set_minimized(minimized);
        let window = window.clone();
        let change = if minimized {
            ChainChange::MakeLast
        } else {
            ChainChange::Update
        };
        self.focus_chain.update(&window, change);
        self.update_visibility();
        self.refocus_if_hidden(handle);
        true
    }

    pub fn set_mapped(&mut self, handle: WindowHandle, mapped: bool) -> bool {
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        if window.is_mapped() == mapped {
            return false;
        }
        window.set_mapped(mapped);
        self.update_visibility();
        self.refocus_if_hidden(handle);
        true
    }

    pub fn set_window_geometry(&mut self, handle: WindowHandle, geometry: Rect) -> bool {
        let output = self.output_for(&geometry);
        let Some(window) = self.window_mut(handle) else {
            return false;
        };
        window.geometry = geometry;
        window.output = output;
        true
    }

    /// Move focus away from the active window once it can no longer be seen.
    fn refocus_if_hidden(&mut self, handle: WindowHandle) {
        if self.active_window() != Some(handle) || self.block_focus > 0 {
            return;
        }
        if self.window(handle).map_or(false, Window::visible) {
            return;
        }
        let next = self.focus_chain.next_for_desktop(
            Some(handle),
            self.subspaces.current_id(),
            self.active_output,
            &self.windows,
        );
        match next {
            Some(next) => {
                self.focus_window(next);
            }
            None => self.unfocus(),
        }
    }

    pub fn output_added(&mut self, output: Output) {
        if let Some(existing) = self.outputs.iter_mut().find(|o| o.id == output.id) {
            *existing = output;
        } else {
            tracing::debug!("Output {} added", output.name);
            if self.active_output.is_none() {
                self.active_output = Some(output.id);
            }
            self.outputs.push(output);
        }
        self.update_window_outputs();
    }

    pub fn output_removed(&mut self, id: OutputId) {
        self.outputs.retain(|o| o.id != id);
        if self.active_output == Some(id) {
            self.active_output = self.outputs.first().map(|o| o.id);
        }
        self.update_window_outputs();
    }

    pub fn set_active_output(&mut self, id: OutputId) -> bool {
        if !self.outputs.iter().any(|o| o.id == id) {
            return false;
        }
        self.active_output = Some(id);
        true
    }

    fn output_for(&self, geometry: &Rect) -> Option<OutputId> {
        let (x, y) = geometry.center();
        nearest_output(&self.outputs, x, y).map(|o| o.id)
    }

    fn update_window_outputs(&mut self) {
        let outputs = &self.outputs;
        for window in &mut self.windows {
            let (x, y) = window.geometry.center();
            window.output = nearest_output(outputs, x, y).map(|o| o.id);
        }
    }
}
