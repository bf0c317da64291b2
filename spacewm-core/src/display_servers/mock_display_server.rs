use super::DisplayAction;
use super::DisplayServer;
use crate::models::{GridCoords, Rect};
use crate::tabbox::TabboxMode;
use crate::utils::modmask_lookup::ModMask;

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug)]
pub struct MockDisplayServer {
    pub allow_grab: bool,
    pub grabbed: bool,
    pub held: ModMask,
    pub takeover: bool,
    pub switcher: Option<Rect>,
    pub allow_switch: bool,
    pub executed: Vec<DisplayAction>,
}

impl Default for MockDisplayServer {
    fn default() -> Self {
        Self {
            allow_grab: true,
            grabbed: false,
            held: ModMask::Zero,
            takeover: false,
            switcher: None,
            allow_switch: true,
            executed: vec![],
        }
    }
}

impl DisplayServer for MockDisplayServer {
    fn grab_keyboard(&mut self) -> bool {
        self.grabbed = self.allow_grab;
        self.grabbed
    }

    fn ungrab_keyboard(&mut self) {
        self.grabbed = false;
    }

    fn modifiers_held(&self, modifiers: ModMask) -> bool {
        self.held.contains(modifiers)
    }

    fn tabbox_takeover(&mut self, _mode: TabboxMode) -> bool {
        self.takeover
    }

    fn switcher_contains(&self, x: i32, y: i32) -> bool {
        self.switcher.is_some_and(|rect| rect.contains_point(x, y))
    }

    fn allow_subspace_change(&mut self, _previous: u32, _offset: GridCoords) -> bool {
        self.allow_switch
    }

    fn execute_action(&mut self, act: DisplayAction) {
        self.executed.push(act);
    }
}
