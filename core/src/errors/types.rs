//! Error taxonomy for the verification flow
//!
//! Every variant is recoverable: the session stays usable and the user can
//! correct the code, wait for the countdown, or retry. `OtpError::notice`
//! maps each variant to the alert a user interface should show, if any.

use thiserror::Error;

use crate::domain::value_objects::Notice;

/// Shown when the backend could not be reached or answered unreadably
pub const DEFAULT_NETWORK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when a verify rejection carries no message
pub const DEFAULT_VERIFY_FAILURE_MESSAGE: &str = "Invalid OTP";

/// Shown when a resend rejection carries no message
pub const DEFAULT_RESEND_FAILURE_MESSAGE: &str = "Failed to resend OTP";

/// Failure reported by a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport failure, timeout or undecodable response
    #[error("Network failure: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl GatewayError {
    /// Server-provided message, if the backend sent a usable one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Verification flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Not every slot is filled, nothing was dispatched
    #[error("Please enter a {expected}-digit OTP.")]
    IncompleteCode { expected: usize },

    /// Identifier passed from the signup screen is not an email address
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Configured code length is neither 4 nor 6
    #[error("Unsupported code length: {digits}")]
    UnsupportedCodeLength { digits: usize },

    /// A verify or resend request is already in flight
    #[error("Another request is already in progress")]
    Busy,

    /// Countdown has not run out yet
    #[error("Resend is not available for another {remaining} seconds")]
    ResendUnavailable { remaining: u32 },

    /// Code was already accepted
    #[error("Code already verified")]
    AlreadyVerified,

    /// Session was unmounted before the request completed
    #[error("Request cancelled")]
    Cancelled,

    /// Verify call failed
    #[error("Verification failed: {0}")]
    Verify(GatewayError),

    /// Resend call failed
    #[error("Resend failed: {0}")]
    Resend(GatewayError),
}

impl OtpError {
    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            OtpError::InvalidEmail { .. } => "Please enter a valid email address.".to_string(),
            OtpError::Verify(err) => Self::gateway_message(err, DEFAULT_VERIFY_FAILURE_MESSAGE),
            OtpError::Resend(err) => Self::gateway_message(err, DEFAULT_RESEND_FAILURE_MESSAGE),
            other => other.to_string(),
        }
    }

    /// Alert to surface, `None` for guard outcomes that are silent no-ops
    pub fn notice(&self) -> Option<Notice> {
        match self {
            OtpError::IncompleteCode { .. } => Some(Notice::new("Invalid OTP", self.user_message())),
            OtpError::InvalidEmail { .. } => Some(Notice::new("Invalid Email", self.user_message())),
            OtpError::Verify(_) | OtpError::Resend(_) => Some(Notice::error(self.user_message())),
            OtpError::UnsupportedCodeLength { .. }
            | OtpError::Busy
            | OtpError::ResendUnavailable { .. }
            | OtpError::AlreadyVerified
            | OtpError::Cancelled => None,
        }
    }

    fn gateway_message(err: &GatewayError, rejection_default: &str) -> String {
        match err {
            GatewayError::Network(_) => DEFAULT_NETWORK_MESSAGE.to_string(),
            GatewayError::Rejected { .. } => err
                .server_message()
                .unwrap_or(rejection_default)
                .to_string(),
        }
    }
}

pub type OtpResult<T> = Result<T, OtpError>;
