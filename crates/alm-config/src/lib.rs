//! # alm-config
//!
//! Layered configuration loading for Almanac using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ALMANAC_*` prefix, `__` as separator)
//! 2. Project-level `.almanac/config.toml`
//! 3. User-level `~/.config/almanac/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ALMANAC_STORAGE__TEMPLATES_PATH` -> `storage.templates_path`,
//! `ALMANAC_STORAGE__DRIVER` -> `storage.driver`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use alm_config::AlmanacConfig;
//!
//! let config = AlmanacConfig::load_with_dotenv().expect("config");
//! println!("templates: {}", config.storage.templates_dir().display());
//! ```

mod error;
mod storage;

pub use error::ConfigError;
pub use storage::StorageConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AlmanacConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AlmanacConfig {
    /// Config with every value defaulted except the storage root.
    #[must_use]
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig::rooted_at(root),
        }
    }

    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse and
    /// `ConfigError::InvalidValue` when a required value is blank.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.storage.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file into the process env.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".almanac/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ALMANAC_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("almanac").join("config.toml"))
    }

    /// Load `.env` from the current directory. Missing files are ignored.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
