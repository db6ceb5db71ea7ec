//! File storage configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_templates_path() -> String {
    ".templates".to_string()
}

fn default_researches_path() -> String {
    ".researches".to_string()
}

fn default_driver() -> String {
    "markdown".to_string()
}

fn default_entry_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Base directory that relative paths resolve against.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory holding one YAML file per template.
    #[serde(default = "default_templates_path")]
    pub templates_path: String,

    /// Directory holding one subdirectory per research.
    #[serde(default = "default_researches_path")]
    pub researches_path: String,

    /// Storage driver selector (e.g., "markdown", "file").
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Status of new researches and of entries created without one.
    #[serde(default = "default_entry_status")]
    pub default_entry_status: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            templates_path: default_templates_path(),
            researches_path: default_researches_path(),
            driver: default_driver(),
            default_entry_status: default_entry_status(),
        }
    }
}

impl StorageConfig {
    /// Storage config rooted at `root` with every other value defaulted.
    #[must_use]
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.templates_path)
    }

    #[must_use]
    pub fn researches_dir(&self) -> PathBuf {
        self.resolve(&self.researches_path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Reject blank paths and a blank default status.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("storage.templates_path", &self.templates_path),
            ("storage.researches_path", &self.researches_path),
            ("storage.driver", &self.driver),
            ("storage.default_entry_status", &self.default_entry_status),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::empty(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert_eq!(config.templates_path, ".templates");
        assert_eq!(config.researches_path, ".researches");
        assert_eq!(config.driver, "markdown");
        assert_eq!(config.default_entry_status, "draft");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let config = StorageConfig::rooted_at("/srv/notes");
        assert_eq!(config.templates_dir(), PathBuf::from("/srv/notes/.templates"));
        assert_eq!(config.researches_dir(), PathBuf::from("/srv/notes/.researches"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = StorageConfig {
            templates_path: "/etc/almanac/templates".into(),
            ..StorageConfig::rooted_at("/srv/notes")
        };
        assert_eq!(config.templates_dir(), PathBuf::from("/etc/almanac/templates"));
    }

    #[test]
    fn blank_values_are_rejected() {
        let config = StorageConfig {
            default_entry_status: "  ".into(),
            ..StorageConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "storage.default_entry_status"
        ));
    }
}
