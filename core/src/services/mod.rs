//! Services containing the flow logic.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    OtpApiTrait, OtpFlowConfig, OtpSession, ResendResponse, SessionStoreTrait, VerifyOutcome,
    VerifyResponse,
};
