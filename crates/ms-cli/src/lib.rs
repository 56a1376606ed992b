//! Motion study CLI library.
//!
//! This crate is the host around the `ms-core` engine: it owns
//! configuration, the on-disk project file, and report output. The engine
//! itself never touches storage.

mod cli;
pub mod commands;
mod config;
mod project;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use project::ProjectFile;
