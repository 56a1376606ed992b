//! CLI subcommand implementations.

pub mod cycles;
pub mod report;
pub mod simulate;
pub mod validate;
