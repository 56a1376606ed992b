//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Time-and-motion study analysis tool.
///
/// Works over a project file of measured work elements and derives
/// standard-time and cycle analytics for industrial engineering reports.
#[derive(Debug, Parser)]
#[command(name = "ms", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Standard-time report (normal time, allowances, standard time).
    Report {
        /// Project file to read. Falls back to the configured default.
        file: Option<PathBuf>,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Per-cycle totals and summary statistics.
    Cycles {
        /// Project file to read. Falls back to the configured default.
        file: Option<PathBuf>,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Check a project file against the measurement validation rules.
    Validate {
        /// Project file to read. Falls back to the configured default.
        file: Option<PathBuf>,
    },

    /// Run a scripted annotation session against an offline clock and
    /// print the resulting timeline.
    Simulate {
        /// Media duration in seconds.
        #[arg(long, default_value_t = 60.0)]
        duration: f64,
    },
}
