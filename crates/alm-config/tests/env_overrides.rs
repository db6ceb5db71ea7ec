//! Environment variables take priority over TOML files and defaults.

use alm_config::{AlmanacConfig, ConfigError};
use figment::Jail;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("ALMANAC_STORAGE__TEMPLATES_PATH", "tpl");
        jail.set_env("ALMANAC_STORAGE__DEFAULT_ENTRY_STATUS", "active");

        let config = AlmanacConfig::load().expect("config loads");
        assert_eq!(config.storage.templates_path, "tpl");
        assert_eq!(config.storage.default_entry_status, "active");
        assert_eq!(config.storage.researches_path, ".researches");
        Ok(())
    });
}

#[test]
fn env_vars_beat_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(".almanac").expect("create .almanac");
        jail.create_file(
            ".almanac/config.toml",
            r#"
[storage]
driver = "file"
researches_path = "from-toml"
"#,
        )?;
        jail.set_env("ALMANAC_STORAGE__RESEARCHES_PATH", "from-env");

        let config = AlmanacConfig::load().expect("config loads");
        assert_eq!(config.storage.driver, "file");
        assert_eq!(config.storage.researches_path, "from-env");
        Ok(())
    });
}

#[test]
fn blank_env_value_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("ALMANAC_STORAGE__TEMPLATES_PATH", "  ");

        let err = AlmanacConfig::load().expect_err("blank path must fail");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
