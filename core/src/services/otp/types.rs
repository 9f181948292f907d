//! Wire and result types for the verification flow

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Route;

/// Shown after a successful resend
pub const RESEND_SUCCESS_MESSAGE: &str = "OTP has been resent to your email.";

/// Body of a successful verify response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub message: String,
    /// Auth token, sent by backends that log the user in on verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Body of a successful resend response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendResponse {
    #[serde(default)]
    pub message: String,
}

/// Result of an accepted verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Backend message
    pub message: String,
    /// Where the user interface should navigate
    pub route: Route,
    /// Whether a returned token was persisted
    pub token_saved: bool,
}
