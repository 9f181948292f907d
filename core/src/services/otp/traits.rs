//! Traits for backend and token storage integration

use async_trait::async_trait;

use crate::errors::GatewayError;

use super::types::{ResendResponse, VerifyResponse};

/// Trait for the OTP endpoints of the REST backend
#[async_trait]
pub trait OtpApiTrait: Send + Sync {
    /// Check a code for the given email
    async fn verify_otp(&self, email: &str, code: &str) -> Result<VerifyResponse, GatewayError>;
    /// Ask the backend to send a fresh code to the given email
    async fn resend_otp(&self, email: &str) -> Result<ResendResponse, GatewayError>;
}

/// Trait for persisting the auth token returned by a successful verification
#[async_trait]
pub trait SessionStoreTrait: Send + Sync {
    /// Store the token for an account, replacing any previous one
    async fn save_token(&self, email: &str, token: &str) -> Result<(), String>;
}
