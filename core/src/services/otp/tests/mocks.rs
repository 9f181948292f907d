//! Mock implementations for testing the verification session

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::GatewayError;
use crate::services::otp::traits::{OtpApiTrait, SessionStoreTrait};
use crate::services::otp::types::{ResendResponse, VerifyResponse};

// Mock backend recording every call it receives
pub struct MockOtpApi {
    pub verify_calls: Mutex<Vec<(String, String)>>,
    pub resend_calls: Mutex<Vec<String>>,
    verify_result: Mutex<Result<VerifyResponse, GatewayError>>,
    resend_result: Mutex<Result<ResendResponse, GatewayError>>,
    delay: Option<Duration>,
}

impl MockOtpApi {
    pub fn new() -> Self {
        Self {
            verify_calls: Mutex::new(Vec::new()),
            resend_calls: Mutex::new(Vec::new()),
            verify_result: Mutex::new(Ok(VerifyResponse {
                message: "OK".to_string(),
                token: None,
            })),
            resend_result: Mutex::new(Ok(ResendResponse {
                message: "OTP resent".to_string(),
            })),
            delay: None,
        }
    }

    /// Every call sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_verify_result(&self, result: Result<VerifyResponse, GatewayError>) {
        *self.verify_result.lock().unwrap() = result;
    }

    pub fn set_resend_result(&self, result: Result<ResendResponse, GatewayError>) {
        *self.resend_result.lock().unwrap() = result;
    }

    pub fn verify_calls(&self) -> Vec<(String, String)> {
        self.verify_calls.lock().unwrap().clone()
    }

    pub fn resend_calls(&self) -> Vec<String> {
        self.resend_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OtpApiTrait for MockOtpApi {
    async fn verify_otp(&self, email: &str, code: &str) -> Result<VerifyResponse, GatewayError> {
        self.verify_calls
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.verify_result.lock().unwrap().clone()
    }

    async fn resend_otp(&self, email: &str) -> Result<ResendResponse, GatewayError> {
        self.resend_calls.lock().unwrap().push(email.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.resend_result.lock().unwrap().clone()
    }
}

// Mock token store
pub struct MockSessionStore {
    pub tokens: Mutex<HashMap<String, String>>,
    pub should_fail: bool,
}

impl MockSessionStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            should_fail,
        }
    }

    pub fn token(&self, email: &str) -> Option<String> {
        self.tokens.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl SessionStoreTrait for MockSessionStore {
    async fn save_token(&self, email: &str, token: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Store unavailable".to_string());
        }
        self.tokens
            .lock()
            .unwrap()
            .insert(email.to_string(), token.to_string());
        Ok(())
    }
}
