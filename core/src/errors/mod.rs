//! Error types for the verification flow.

mod types;


pub use types::{
    GatewayError, OtpError, OtpResult, DEFAULT_NETWORK_MESSAGE, DEFAULT_RESEND_FAILURE_MESSAGE,
    DEFAULT_VERIFY_FAILURE_MESSAGE,
};
