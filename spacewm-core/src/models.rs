//! Objects (such as subspaces and windows) the engine is built from.
mod focus_chain;
mod manager;
mod output;
mod stacking_order;
mod subspace;
mod subspace_chain;
mod subspace_grid;
mod subspace_manager;
mod window;

pub mod dto;

pub use focus_chain::{ChainChange, FocusChain};
pub use manager::Manager;
pub use output::{nearest_output, Output, OutputId, Rect};
pub use stacking_order::StackingOrder;
pub use subspace::{default_name, Subspace, SubspaceId};
pub use subspace_chain::SubspaceChain;
pub use subspace_grid::{GridCoords, SubspaceGrid};
pub use subspace_manager::{Direction, SubspaceEvent, SubspaceManager, MAXIMUM};
pub use window::{Window, WindowHandle, WindowType};
