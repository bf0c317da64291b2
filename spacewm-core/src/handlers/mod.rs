mod focus_handler;
mod input_handler;
mod subspace_handler;
mod tabbox_handler;
mod window_handler;

use super::display_action::DisplayAction;
use super::display_servers::DisplayServer;
use super::models::{ChainChange, Manager, SubspaceEvent, SubspaceId, Window, WindowHandle};
