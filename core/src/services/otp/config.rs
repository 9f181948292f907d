//! Configuration for the verification flow

use std::time::Duration;

use fint_shared::config::OtpConfig;
use fint_shared::config::otp::DEFAULT_COUNTDOWN_SECONDS;

use crate::domain::entities::CodeLength;
use crate::errors::OtpError;

/// Configuration for an `OtpSession`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpFlowConfig {
    /// Number of digit slots
    pub code_length: CodeLength,
    /// Initial value of the resend countdown in seconds
    pub countdown_seconds: u32,
    /// Time between countdown ticks
    pub tick_interval: Duration,
}

impl Default for OtpFlowConfig {
    fn default() -> Self {
        Self {
            code_length: CodeLength::Four,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl OtpFlowConfig {
    /// Six digit variant
    pub fn six_digits() -> Self {
        Self {
            code_length: CodeLength::Six,
            ..Default::default()
        }
    }
}

impl TryFrom<&OtpConfig> for OtpFlowConfig {
    type Error = OtpError;

    fn try_from(config: &OtpConfig) -> Result<Self, Self::Error> {
        let code_length = CodeLength::from_digits(config.code_length).ok_or(
            OtpError::UnsupportedCodeLength {
                digits: config.code_length,
            },
        )?;

        Ok(Self {
            code_length,
            countdown_seconds: config.countdown_seconds,
            ..Default::default()
        })
    }
}
