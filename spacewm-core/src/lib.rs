//! Virtual desktops, activation recency and the window switcher.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
pub mod config;
mod display_action;
pub mod display_servers;
pub mod errors;
mod handlers;
pub mod models;
pub mod state;
pub mod tabbox;
pub mod utils;

pub use config::{ConfigStore, MemoryStore};
pub use display_action::DisplayAction;
pub use display_servers::DisplayServer;
pub use models::{FocusChain, Manager, Subspace, SubspaceId, SubspaceManager, Window, WindowHandle};
pub use state::State;
pub use tabbox::{Tabbox, TabboxMode};
