use crate::models::{SubspaceId, WindowHandle};
use crate::state::State;
use serde::{Deserialize, Serialize};

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubspaceSummary {
    pub id: SubspaceId,
    pub x11_id: u32,
    pub name: String,
    pub current: bool,
    /// Column and row in the grid, zero based.
    pub column: i32,
    pub row: i32,
    pub busy: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub handle: WindowHandle,
    pub name: Option<String>,
    /// Ordinals of the subspaces the window is on, empty for all of them.
    pub subspaces: Vec<u32>,
    pub visible: bool,
    pub minimized: bool,
}

/// Snapshot of the arrangement handed to status bars and the command line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArrangementState {
    pub current: u32,
    pub rows: u32,
    pub columns: u32,
    pub navigation_wrapping: bool,
    pub subspaces: Vec<SubspaceSummary>,
    pub windows: Vec<WindowSummary>,
    pub active_window: Option<WindowHandle>,
    /// Most recently used first.
    pub recent_subspaces: Vec<u32>,
}

impl From<&State> for ArrangementState {
    fn from(state: &State) -> Self {
        let manager = &state.subspaces;
        let (columns, rows) = manager.grid().size();
        let current = manager.current_id();
        let subspaces = manager
            .subspaces()
            .iter()
            .map(|subspace| {
                let (column, row) = manager.grid().coords(subspace.x11_id).unwrap_or((0, 0));
                SubspaceSummary {
                    id: subspace.id,
                    x11_id: subspace.x11_id,
                    name: subspace.name.clone(),
                    current: subspace.id == current,
                    column,
                    row,
                    busy: state
                        .windows
                        .iter()
                        .any(|w| !w.is_on_all_subspaces() && w.is_on_subspace(subspace.id)),
                }
            })
            .collect();
        let windows = state
            .windows
            .iter()
            .map(|window| WindowSummary {
                handle: window.handle,
                name: window.name.clone(),
                subspaces: window
                    .subspaces()
                    .iter()
                    .filter_map(|id| manager.x11_id_of(*id))
                    .collect(),
                visible: window.visible(),
                minimized: window.is_minimized(),
            })
            .collect();
        Self {
            current: manager.current_x11_id(),
            rows,
            columns,
            navigation_wrapping: manager.is_navigation_wrapping(),
            subspaces,
            windows,
            active_window: state.active_window(),
            recent_subspaces: state.subspace_chain.as_slice().to_vec(),
        }
    }
}
