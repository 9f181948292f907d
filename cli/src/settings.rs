//! Layered configuration loading
//!
//! Later layers win:
//! 1. Per-environment defaults plus `FINT_*` variables (`AppConfig::from_env`)
//! 2. `fint.<environment>.toml` in the working directory, if present
//! 3. The file passed with `--config`
//! 4. `FINT__SECTION__KEY` variables, e.g. `FINT__API__BASE_URL`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment as EnvSource, File};
use fint_shared::config::AppConfig;

/// Load configuration from every layer
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_layers(&AppConfig::from_env(), explicit, None)
}

/// Load configuration on top of `base`
///
/// `env_vars` replaces the process environment for the last layer when set.
pub fn load_layers(
    base: &AppConfig,
    explicit: Option<&Path>,
    env_vars: Option<HashMap<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .add_source(Config::try_from(base)?)
        .add_source(File::from(PathBuf::from(base.environment.config_file())).required(false));

    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder
        .add_source(
            EnvSource::with_prefix("FINT")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fint-cli-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fint.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_base_passes_through() {
        let base = AppConfig::production();
        let loaded = load_layers(&base, None, Some(HashMap::new())).unwrap();
        assert_eq!(loaded, base);
    }

    #[test]
    fn test_file_overrides_base() {
        let path = write_temp(
            r#"
[api]
base_url = "http://localhost:9000/api"

[otp]
code_length = 6
"#,
        );

        let loaded = load_layers(&AppConfig::development(), Some(&path), Some(HashMap::new()))
            .unwrap();
        assert_eq!(loaded.api.base_url, "http://localhost:9000/api");
        assert_eq!(loaded.api.request_timeout_secs, 30);
        assert_eq!(loaded.otp.code_length, 6);
        assert_eq!(loaded.otp.countdown_seconds, 30);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_env_overrides_file() {
        let path = write_temp("[otp]\ncountdown_seconds = 45\n");
        let env = HashMap::from([
            ("FINT__OTP__COUNTDOWN_SECONDS".to_string(), "10".to_string()),
            ("FINT__LOGGING__FORMAT".to_string(), "json".to_string()),
        ]);

        let loaded = load_layers(&AppConfig::development(), Some(&path), Some(env)).unwrap();
        assert_eq!(loaded.otp.countdown_seconds, 10);
        assert_eq!(
            loaded.logging.format,
            fint_shared::config::LogFormat::Json
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = std::env::temp_dir().join(format!("fint-missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(load_layers(&AppConfig::default(), Some(&missing), Some(HashMap::new())).is_err());
    }
}
