//! OTP flow configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Number of digits in the default code
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Seconds before a new code may be requested
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 30;

/// OTP verification flow configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digit slots (4 or 6)
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Initial value of the resend countdown
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

impl OtpConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            code_length: lookup("FINT_OTP_CODE_LENGTH")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CODE_LENGTH),
            countdown_seconds: lookup("FINT_OTP_COUNTDOWN_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COUNTDOWN_SECONDS),
        }
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_countdown_seconds() -> u32 {
    DEFAULT_COUNTDOWN_SECONDS
}
