#![allow(clippy::wildcard_imports)]

use super::*;
use crate::models::Direction;
use crate::state::State;

impl State {
    /// React to everything the subspace manager queued: migrate windows off
    /// removed subspaces, keep the chains in step and refresh the session
    /// when the current subspace changed.
    pub(crate) fn process_subspace_events(&mut self) {
        let events = self.subspaces.take_events();
        if events.is_empty() {
            return;
        }
        let mut current_changed = false;
        let mut structure_changed = false;
        for event in &events {
            match *event {
                SubspaceEvent::Removed { id, x11_id } => {
                    self.migrate_windows(id, x11_id);
                    self.subspace_chain.remove(x11_id);
                    structure_changed = true;
                }
                SubspaceEvent::CountChanged { count, .. } => {
                    self.subspace_chain.resize(count);
                    structure_changed = true;
                }
                SubspaceEvent::Created(id) => {
                    if let Some(x11_id) = self.subspaces.x11_id_of(id) {
                        self.subspace_chain.insert(x11_id);
                    }
                    structure_changed = true;
                }
                SubspaceEvent::CurrentChanged { .. } => current_changed = true,
                _ => {}
            }
        }
        if structure_changed {
            let ids = self.subspace_ids();
            self.focus_chain.resize(&ids, &self.windows);
        }
        self.actions
            .extend(events.into_iter().map(DisplayAction::Subspace));

        if current_changed {
            let current = self.subspaces.current();
            let (id, x11_id) = (current.id, current.x11_id);
            self.subspace_chain.add(x11_id);
            self.focus_chain.set_current_subspace(id);
        }
        if current_changed || structure_changed {
            self.lock_stacking();
            self.update_visibility();
            if current_changed {
                self.activate_on_current_subspace();
            }
            self.unlock_stacking();
        }
    }

    /// Windows only on `removed` move to the subspace now holding its
    /// ordinal, or the last one.
    fn migrate_windows(&mut self, removed: SubspaceId, x11_id: u32) {
        let target = x11_id.min(self.subspaces.count());
        let Some(target) = self.subspaces.subspace(target).map(|s| s.id) else {
            return;
        };
        for window in &mut self.windows {
            if !window.subspaces().contains(&removed) {
                continue;
            }
            let remaining: Vec<SubspaceId> = window
                .subspaces()
                .iter()
                .copied()
                .filter(|id| *id != removed)
                .collect();
            if remaining.is_empty() {
                tracing::trace!("Moving window {:?} to subspace {}", window.handle, target);
                window.set_subspaces(vec![target]);
            } else {
                window.set_subspaces(remaining);
            }
        }
        self.focus_chain.merge_subspace(removed, target);
    }

    pub(crate) fn update_visibility(&mut self) {
        let current = self.subspaces.current_id();
        for window in &mut self.windows {
            let visible = window.is_on_subspace(current) && window.is_shown();
            if window.visible() != visible {
                window.set_visible(visible);
                self.actions
                    .push_back(DisplayAction::SetVisible(window.handle, visible));
            }
        }
    }

    fn activate_on_current_subspace(&mut self) {
        if self.block_focus > 0 {
            return;
        }
        let output = self.active_output.filter(|_| self.focus_chain.separate_screen_focus);
        let current = self.subspaces.current_id();
        match self
            .focus_chain
            .get_for_activation(current, output, &self.windows)
        {
            Some(handle) => {
                self.focus_window(handle);
            }
            None => self.unfocus(),
        }
    }
}

impl<SERVER: DisplayServer> Manager<SERVER> {
    /// Switch to another subspace, letting the display server veto it.
    pub fn set_current_subspace(&mut self, x11_id: u32) -> bool {
        let server = &mut self.display_server;
        let changed = self
            .state
            .subspaces
            .set_current_with(x11_id, |previous, offset| {
                server.allow_subspace_change(previous, offset)
            });
        self.state.process_subspace_events();
        changed
    }

    /// Switch in a direction, wrapping as configured.
    pub fn switch_subspace(&mut self, direction: Direction) -> bool {
        let subspaces = &self.state.subspaces;
        let target = subspaces.toward(direction, None, subspaces.is_navigation_wrapping());
        self.set_current_subspace(target)
    }
}

impl State {
    pub fn set_subspace_count(&mut self, count: u32) {
        self.subspaces.set_count(count);
        self.process_subspace_events();
    }

    pub fn set_subspace_rows(&mut self, rows: u32) {
        self.subspaces.set_rows(rows);
        self.process_subspace_events();
    }

    pub fn create_subspace(&mut self, position: u32, name: &str) -> Option<SubspaceId> {
        let id = self.subspaces.create_subspace(position, name);
        self.process_subspace_events();
        id
    }

    pub fn remove_subspace(&mut self, id: SubspaceId) -> bool {
        let removed = self.subspaces.remove_subspace(id);
        self.process_subspace_events();
        removed
    }

    pub fn rename_subspace(&mut self, id: SubspaceId, name: &str) -> bool {
        let renamed = self.subspaces.set_name(id, name);
        self.process_subspace_events();
        renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_servers::MockDisplayServer;

    fn window_on(manager: &mut Manager<MockDisplayServer>, handle: u32, x11_id: u32) {
        let id = manager.state.subspaces.subspace(x11_id).map(|s| s.id).unwrap();
        let mut window = Window::new(WindowHandle(handle), None);
        window.set_subspaces(vec![id]);
        manager.window_created(window, false);
    }

    #[test]
    fn shrinking_migrates_exclusive_windows_to_the_survivor() {
        let mut manager = Manager::new_test(2);
        let first = manager.state.subspaces.subspace(1).map(|s| s.id).unwrap();
        window_on(&mut manager, 1, 2);
        manager.state.set_subspace_count(1);
        assert_eq!(manager.state.subspaces.subspace(1).map(|s| s.id), Some(first));
        let window = manager.state.window(WindowHandle(1)).unwrap();
        assert_eq!(window.subspaces(), [first]);
        assert!(manager.state.focus_chain.contains(WindowHandle(1), first));
        assert!(window.visible());
    }

    #[test]
    fn removing_a_middle_subspace_migrates_to_the_neighbour() {
        let mut manager = Manager::new_test(3);
        let second = manager.state.subspaces.subspace(2).map(|s| s.id).unwrap();
        let third = manager.state.subspaces.subspace(3).map(|s| s.id).unwrap();
        window_on(&mut manager, 1, 2);
        assert!(manager.state.remove_subspace(second));
        assert_eq!(manager.state.subspaces.x11_id_of(third), Some(2));
        let window = manager.state.window(WindowHandle(1)).unwrap();
        assert_eq!(window.subspaces(), [third]);
        assert!(manager.state.focus_chain.contains(WindowHandle(1), third));
    }

    #[test]
    fn switching_refocuses_the_most_recent_window() {
        let mut manager = Manager::new_test(2);
        window_on(&mut manager, 1, 1);
        window_on(&mut manager, 2, 2);
        manager.activate_window(WindowHandle(1));
        assert!(manager.set_current_subspace(2));
        assert_eq!(manager.state.active_window(), Some(WindowHandle(2)));
        assert!(!manager.state.window(WindowHandle(1)).unwrap().visible());
        assert_eq!(manager.state.subspace_chain.as_slice()[0], 2);

        assert!(manager.set_current_subspace(1));
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn switching_to_an_empty_subspace_unfocuses() {
        let mut manager = Manager::new_test(2);
        window_on(&mut manager, 1, 1);
        manager.activate_window(WindowHandle(1));
        manager.state.actions.clear();
        assert!(manager.set_current_subspace(2));
        assert_eq!(manager.state.active_window(), None);
        assert!(manager.state.actions.contains(&DisplayAction::Unfocus));
    }

    #[test]
    fn vetoed_switch_keeps_the_current_subspace() {
        let mut manager = Manager::new_test(2);
        manager.display_server.allow_switch = false;
        assert!(!manager.set_current_subspace(2));
        assert_eq!(manager.state.subspaces.current_x11_id(), 1);
        assert!(manager.state.actions.contains(&DisplayAction::Subspace(
            SubspaceEvent::CurrentChangingCancelled
        )));
    }

    #[test]
    fn switch_uses_navigation_wrapping() {
        let mut manager = Manager::new_test(2);
        manager.set_current_subspace(2);
        manager.state.subspaces.set_navigation_wrapping(true);
        assert!(manager.switch_subspace(Direction::Next));
        assert_eq!(manager.state.subspaces.current_x11_id(), 1);
        manager.state.subspaces.set_navigation_wrapping(false);
        assert!(!manager.switch_subspace(Direction::Previous));
    }

    #[test]
    fn a_switch_publishes_the_window_order_once() {
        let mut manager = Manager::new_test(2);
        window_on(&mut manager, 1, 1);
        window_on(&mut manager, 2, 1);
        manager.state.take_actions();
        manager.state.lock_stacking();
        manager.state.raise_window(WindowHandle(1));
        manager.state.lower_window(WindowHandle(2));
        assert!(manager.set_current_subspace(2));
        manager.state.unlock_stacking();
        let orders: Vec<_> = manager
            .state
            .take_actions()
            .into_iter()
            .filter(|a| matches!(a, DisplayAction::SetWindowOrder(_)))
            .collect();
        assert_eq!(
            orders,
            [DisplayAction::SetWindowOrder(vec![WindowHandle(1), WindowHandle(2)])]
        );
    }

    #[test]
    fn new_subspaces_keep_windows_on_all_subspaces_focused() {
        let mut manager = Manager::new_test(2);
        window_on(&mut manager, 1, 1);
        manager.activate_window(WindowHandle(1));
        assert!(manager.state.set_on_all_subspaces(WindowHandle(1), true));

        manager.state.set_subspace_count(3);
        let third = manager.state.subspaces.subspace(3).map(|s| s.id).unwrap();
        assert!(manager.state.focus_chain.contains(WindowHandle(1), third));
        assert!(manager.set_current_subspace(3));
        assert!(manager.state.window(WindowHandle(1)).unwrap().visible());
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));

        let created = manager.state.create_subspace(0, "").unwrap();
        assert!(manager.state.focus_chain.contains(WindowHandle(1), created));
        assert!(manager.set_current_subspace(1));
        assert_eq!(manager.state.subspaces.current_id(), created);
        assert_eq!(manager.state.active_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn recent_subspaces_follow_renumbering() {
        let mut manager = Manager::new_test(3);
        manager.set_current_subspace(2);
        manager.set_current_subspace(3);
        assert_eq!(manager.state.subspace_chain.as_slice(), [3, 2, 1]);

        let second = manager.state.subspaces.subspace(2).map(|s| s.id).unwrap();
        assert!(manager.state.remove_subspace(second));
        assert_eq!(manager.state.subspaces.current_x11_id(), 2);
        assert_eq!(manager.state.subspace_chain.as_slice(), [2, 1]);

        manager.state.create_subspace(0, "");
        assert_eq!(manager.state.subspaces.current_x11_id(), 3);
        assert_eq!(manager.state.subspace_chain.as_slice(), [3, 2, 1]);
    }
}
