//! Backend API configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Default backend base URL used by the mobile app builds
pub const DEFAULT_BASE_URL: &str = "http://192.168.17.109:8000/api";

/// REST backend configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup);
        config
    }

    /// Override only the fields whose variables are set and parse
    pub fn apply_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("FINT_API_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(secs) = lookup("FINT_API_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = secs;
        }
        if let Some(secs) = lookup("FINT_API_CONNECT_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.connect_timeout_secs = secs;
        }
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}
