//! Host-owned project persistence.
//!
//! The engine exposes measurement snapshots and accepts whole-collection
//! replacements; everything about where and how they live on disk belongs
//! here, in the host.

use std::path::Path;

use anyhow::{Context, Result};
use ms_core::Measurement;
use serde::{Deserialize, Serialize};

/// A saved analysis project: a name plus the measurement sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Display name of the project.
    #[serde(default)]
    pub project_name: String,

    /// The measurement sequence, as last committed by the engine.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl ProjectFile {
    /// Reads and parses a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse project file {}", path.display()))
    }

    /// Writes the project file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("failed to serialize project")?;
        std::fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::MeasurementDraft;

    #[test]
    fn save_load_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/dir/project.json");

        let project = ProjectFile {
            project_name: "Line 3 study".to_string(),
            measurements: vec![
                MeasurementDraft::new(0.0, 2.0).build(),
                MeasurementDraft::new(2.0, 5.5).build(),
            ],
        };
        project.save(&path).unwrap();

        let loaded = ProjectFile::load(&path).unwrap();
        assert_eq!(loaded.project_name, "Line 3 study");
        assert_eq!(loaded.measurements, project.measurements);
    }

    #[test]
    fn load_missing_file_errors_with_path() {
        let err = ProjectFile::load(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/project.json"));
    }

    #[test]
    fn empty_object_parses_with_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("project.json");
        std::fs::write(&path, "{}").unwrap();

        let loaded = ProjectFile::load(&path).unwrap();
        assert!(loaded.project_name.is_empty());
        assert!(loaded.measurements.is_empty());
    }
}
