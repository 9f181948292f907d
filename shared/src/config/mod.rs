//! Configuration module with client-specific sub-modules
//!
//! - `api` - REST backend endpoint and timeouts
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP code length and resend countdown

pub mod api;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use api::ApiConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// OTP flow configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            api: ApiConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig::new("https://api.fint.app/api").with_request_timeout(15),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Per-environment defaults with `FINT_*` variables from `lookup` applied
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::from_lookup(&lookup);
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.api.apply_lookup(&lookup);
        config.otp = OtpConfig::from_lookup(&lookup);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.environment.is_development());
        assert_eq!(config.otp.code_length, 4);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_production_config() {
        let config = AppConfig::production();
        assert!(config.environment.is_production());
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_deserialize_partial_document() {
        let config: AppConfig = serde_json::from_str(
            r#"{"environment": "staging", "otp": {"code_length": 6}}"#,
        )
        .unwrap();
        assert!(config.environment.is_staging());
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.countdown_seconds, 30);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_base_url_override_keeps_environment_timeouts() {
        let vars = HashMap::from([
            ("FINT_ENV", "production"),
            ("FINT_API_BASE_URL", "https://eu.fint.app/api"),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(config.environment.is_production());
        assert_eq!(config.api.base_url, "https://eu.fint.app/api");
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.logging.level, "warn");
    }
}
