use crate::config::ConfigStore;
use crate::display_servers::DisplayServer;
use crate::state::State;

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<SERVER> {
    pub state: State,
    pub display_server: SERVER,
}

impl<SERVER> Manager<SERVER>
where
    SERVER: DisplayServer,
{
    pub fn new(display_server: SERVER) -> Self {
        Self {
            state: State::new(),
            display_server,
        }
    }

    /// Restore persisted subspaces and read the configuration.
    pub fn load(&mut self, store: &impl ConfigStore) {
        self.state.load(store);
    }

    pub fn reconfigure(&mut self, store: &impl ConfigStore) {
        self.state.reconfigure(store);
        if self.state.tabbox.is_grabbed() {
            self.state.tabbox_reset(true);
        }
    }

    /// Hand every queued action to the display server.
    pub fn flush(&mut self) {
        while let Some(act) = self.state.actions.pop_front() {
            self.display_server.execute_action(act);
        }
    }
}

#[cfg(test)]
impl Manager<crate::display_servers::MockDisplayServer> {
    pub fn new_test(count: u32) -> Self {
        Self {
            state: State::new_test(count),
            display_server: crate::display_servers::MockDisplayServer::default(),
        }
    }
}
