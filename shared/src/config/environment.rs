//! Runtime environment detection and per-environment logging defaults

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Variables consulted, in order, to pick the environment
const ENV_KEYS: [&str; 3] = ["FINT_ENV", "ENVIRONMENT", "RUST_ENV"];

/// Deployment environment the client runs against
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    pub fn is_staging(&self) -> bool {
        *self == Environment::Staging
    }

    /// Lower-case name used in file names and logs
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Detect from the process environment, defaulting to development
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Detect from an arbitrary lookup; unparseable values fall back to development
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ENV_KEYS
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Optional TOML file layered over the built-in defaults
    pub fn config_file(&self) -> String {
        format!("fint.{}.toml", self.name())
    }

    /// Optional dotenv file loaded before configuration
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.name())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment '{}'", other)),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Logging settings handed to the front-end's subscriber
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `fint_core=debug,warn`
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// ANSI colors
    #[serde(default = "enabled")]
    pub colored: bool,
    /// File and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            colored: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        let (level, format, colored, source_location) = match env {
            Environment::Development => ("debug", LogFormat::Pretty, true, true),
            Environment::Staging => ("info", LogFormat::Json, false, false),
            Environment::Production => ("warn", LogFormat::Compact, false, false),
        };
        Self {
            level: level.to_string(),
            format,
            colored,
            source_location,
        }
    }
}

fn enabled() -> bool {
    true
}
