//! Window Information
use super::output::{OutputId, Rect};
use super::SubspaceId;
use serde::{Deserialize, Serialize};

/// A backend-agnostic handle used to identify a window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u32);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowType {
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    #[default]
    Normal,
    Notification,
    OnScreenDisplay,
}

/// Store window information.
///
/// Only the capabilities the arrangement engine consumes are kept here, the
/// backend owns everything else about a window.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Window {
    pub handle: WindowHandle,
    pub name: Option<String>,
    pub res_class: Option<String>,
    pub pid: Option<u32>,
    pub r#type: WindowType,
    /// Empty means the window is on all subspaces.
    subspaces: Vec<SubspaceId>,
    minimized: bool,
    mapped: bool,
    visible: bool,
    pub accepts_input: bool,
    pub skip_switcher: bool,
    pub keep_above: bool,
    pub keep_below: bool,
    /// Unmanaged windows (override redirect, internal surfaces) never take part in switching.
    pub managed: bool,
    pub geometry: Rect,
    pub output: Option<OutputId>,
}

impl Window {
    #[must_use]
    pub fn new(handle: WindowHandle, name: Option<String>) -> Self {
        Self {
            handle,
            name,
            res_class: None,
            pid: None,
            r#type: WindowType::Normal,
            subspaces: vec![],
            minimized: false,
            mapped: true,
            visible: true,
            accepts_input: true,
            skip_switcher: false,
            keep_above: false,
            keep_below: false,
            managed: true,
            geometry: Rect::default(),
            output: None,
        }
    }

    pub fn subspaces(&self) -> &[SubspaceId] {
        &self.subspaces
    }

    pub fn is_on_all_subspaces(&self) -> bool {
        self.subspaces.is_empty()
    }

    pub fn is_on_subspace(&self, id: SubspaceId) -> bool {
        self.subspaces.is_empty() || self.subspaces.contains(&id)
    }

    pub fn set_subspaces(&mut self, subspaces: Vec<SubspaceId>) {
        let mut unique = Vec::with_capacity(subspaces.len());
        for id in subspaces {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.subspaces = unique;
    }

    /// Add a membership. Returns whether anything changed.
    pub fn enter(&mut self, id: SubspaceId) -> bool {
        if self.is_on_subspace(id) {
            return false;
        }
        self.subspaces.push(id);
        true
    }

    /// Drop a membership. A window always keeps at least one subspace, and a
    /// window on all subspaces has to be pinned to explicit ones first.
    pub fn leave(&mut self, id: SubspaceId) -> bool {
        if self.subspaces.len() < 2 {
            return false;
        }
        let before = self.subspaces.len();
        self.subspaces.retain(|s| s != &id);
        before != self.subspaces.len()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn set_minimized(&mut self, value: bool) {
        self.minimized = value;
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    pub fn set_mapped(&mut self, value: bool) {
        self.mapped = value;
    }

    /// Mapped and not minimized.
    pub fn is_shown(&self) -> bool {
        self.mapped && !self.minimized
    }

    /// Shown and placed on the current subspace.
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, value: bool) {
        self.visible = value;
    }

    pub fn is_desktop(&self) -> bool {
        self.r#type == WindowType::Desktop
    }

    pub fn is_special(&self) -> bool {
        matches!(
            self.r#type,
            WindowType::Desktop
                | WindowType::Dock
                | WindowType::Splash
                | WindowType::Toolbar
                | WindowType::Notification
                | WindowType::OnScreenDisplay
        )
    }

    pub fn wants_tab_focus(&self) -> bool {
        matches!(self.r#type, WindowType::Normal | WindowType::Dialog)
            && self.accepts_input
            && self.managed
    }

    pub fn is_on_output(&self, output: OutputId) -> bool {
        self.output == Some(output)
    }

    /// Windows of the same process or the same class belong together.
    pub fn same_application(&self, other: &Window) -> bool {
        if self.handle == other.handle {
            return true;
        }
        match (self.pid, other.pid) {
            (Some(a), Some(b)) if a == b => return true,
            _ => {}
        }
        matches!((&self.res_class, &other.res_class), (Some(a), Some(b)) if a == b)
    }
}
