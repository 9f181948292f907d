//! Shared utilities and common types for the FINT client
//!
//! This crate provides functionality used across all client crates:
//! - Configuration types (backend endpoint, OTP flow, logging)
//! - Environment detection
//! - Email validation and masking

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{ApiConfig, AppConfig, Environment, LogFormat, LoggingConfig, OtpConfig};
pub use utils::email;
