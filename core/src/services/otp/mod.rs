//! OTP verification service module
//!
//! This module provides the verification screen's behavior:
//! - Digit-slot entry with focus handling
//! - A 1 Hz resend countdown owned by the session
//! - Verify and resend calls through an `OtpApiTrait` backend
//! - Cancellation of the countdown and in-flight calls on unmount
//! - Optional persistence of the returned auth token

mod config;
mod session;
mod state;
mod ticker;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpFlowConfig;
pub use session::OtpSession;
pub use traits::{OtpApiTrait, SessionStoreTrait};
pub use types::{ResendResponse, VerifyOutcome, VerifyResponse, RESEND_SUCCESS_MESSAGE};
