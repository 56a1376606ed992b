//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ms_core::AllowanceConfig;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default project file used when a command omits the path.
    pub project_path: PathBuf,

    /// Process-wide allowance percentages for standard-time reports.
    pub allowances: AllowanceConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("project_path", &self.project_path)
            .field("allowances", &self.allowances)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            project_path: data_dir.join("project.json"),
            allowances: AllowanceConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MS_*)
        figment = figment.merge(Env::prefixed("MS_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ms.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ms"))
}

/// Returns the platform-specific data directory for ms.
///
/// On Linux: `~/.local/share/ms`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ms"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_returns_some() {
        assert!(dirs_data_path().is_some());
    }

    #[test]
    fn test_dirs_data_path_ends_with_ms() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ms");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_project() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.project_path, data_dir.join("project.json"));
    }

    #[test]
    fn test_default_allowances_total_eleven_percent() {
        let config = Config::default();
        assert!((config.allowances.total() - 11.0).abs() < f64::EPSILON);
    }
}
