//! Various shared helpers used by the engine.
pub mod global_shortcuts;
pub mod modmask_lookup;
pub mod screen_edges;
pub mod timers;
