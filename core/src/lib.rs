//! # FINT Core
//!
//! Core logic of the FINT client's OTP verification flow.
//! This crate contains the domain entities (code entry, resend countdown),
//! the flow state exposed to user interfaces, the error taxonomy, the
//! backend and token-store traits, and the `OtpSession` that ties them
//! together for the lifetime of a verification screen.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
