//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use std::path::PathBuf;

use alm_config::AlmanacConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
root = "/srv/notes"
templates_path = "templates"
researches_path = "/data/researches"
driver = "file"
default_entry_status = "active"
"#,
        )?;

        let config: AlmanacConfig = Figment::from(Serialized::defaults(AlmanacConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.driver, "file");
        assert_eq!(config.storage.default_entry_status, "active");
        assert_eq!(
            config.storage.templates_dir(),
            PathBuf::from("/srv/notes/templates")
        );
        assert_eq!(
            config.storage.researches_dir(),
            PathBuf::from("/data/researches")
        );
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
templates_path = "tpl"
"#,
        )?;

        let config: AlmanacConfig = Figment::from(Serialized::defaults(AlmanacConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.templates_path, "tpl");
        assert_eq!(config.storage.researches_path, ".researches");
        assert_eq!(config.storage.driver, "markdown");
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(".almanac").expect("create .almanac");
        jail.create_file(
            ".almanac/config.toml",
            r#"
[storage]
default_entry_status = "open"
"#,
        )?;

        let config = AlmanacConfig::load().expect("config loads");
        assert_eq!(config.storage.default_entry_status, "open");
        Ok(())
    });
}
