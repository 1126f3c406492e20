use figment::Jail;
use tq_config::{ConfigError, TqConfig};

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("TRANSITQ_API__API_KEY", "key-from-env");
        jail.set_env("TRANSITQ_STORE__DB_PATH", ":memory:");

        let config = TqConfig::load().expect("config loads");
        assert_eq!(config.api.api_key(), Some("key-from-env"));
        assert!(config.store.is_in_memory());
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".transitq")?;
        jail.create_file(
            ".transitq/config.toml",
            r#"
[api]
timeout_secs = 10
"#,
        )?;
        jail.set_env("TRANSITQ_API__TIMEOUT_SECS", "45");

        let config = TqConfig::load().expect("config loads");
        assert_eq!(config.api.timeout_secs, 45);
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("TRANSITQ_API__TIMEOUT_SECS", "0");

        let err = TqConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
        Ok(())
    });
}
