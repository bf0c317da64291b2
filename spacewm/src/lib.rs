//! Configuration storage and command line tooling for spacewm.
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod utils;

pub use config::FileStore;
