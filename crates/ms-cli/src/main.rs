use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ms_cli::commands::{cycles, report, simulate, validate};
use ms_cli::{Cli, Commands, Config, ProjectFile};

/// Load config and the project file a command should operate on.
fn load_project(config_path: Option<&Path>, file: Option<&Path>) -> Result<(ProjectFile, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = file.map_or_else(|| config.project_path.clone(), Path::to_path_buf);
    let project = ProjectFile::load(&path)?;
    tracing::debug!(
        path = %path.display(),
        measurements = project.measurements.len(),
        "loaded project"
    );
    Ok((project, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Report { file, json }) => {
            let (project, config) = load_project(cli.config.as_deref(), file.as_deref())?;
            report::run(&mut out, &project.measurements, &config.allowances, *json)?;
        }
        Some(Commands::Cycles { file, json }) => {
            let (project, _config) = load_project(cli.config.as_deref(), file.as_deref())?;
            cycles::run(&mut out, &project.measurements, *json)?;
        }
        Some(Commands::Validate { file }) => {
            let (project, _config) = load_project(cli.config.as_deref(), file.as_deref())?;
            validate::run(&mut out, &project.measurements)?;
        }
        Some(Commands::Simulate { duration }) => {
            simulate::run(&mut out, *duration)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
