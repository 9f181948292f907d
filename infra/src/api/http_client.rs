//! reqwest implementation of the OTP backend

use std::time::Duration;

use async_trait::async_trait;
use fint_core::errors::GatewayError;
use fint_core::services::{OtpApiTrait, ResendResponse, VerifyResponse};
use fint_shared::config::ApiConfig;
use fint_shared::utils::email::mask_email;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct VerifyOtpRequest<'a> {
    otp: &'a str,
}

#[derive(Debug, Serialize)]
struct ResendOtpRequest<'a> {
    email: &'a str,
}

/// Error body the backend sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the backend's OTP endpoints
#[derive(Debug, Clone)]
pub struct HttpOtpApi {
    client: Client,
    base_url: Url,
}

impl HttpOtpApi {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, InfrastructureError> {
        let base_url = Url::parse(config.normalized_base_url()).map_err(|e| {
            InfrastructureError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(InfrastructureError::Config(format!(
                "API base URL cannot carry paths: {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("fint-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %base_url, "OTP API client initialized");

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, InfrastructureError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| InfrastructureError::Config("API base URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, InfrastructureError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message);
            warn!(
                path = url.path(),
                status = status.as_u16(),
                "Backend rejected request"
            );
            return Err(InfrastructureError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        // A bare 200 with no body still counts as success
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| InfrastructureError::Decode(e.to_string()))
    }
}

#[async_trait]
impl OtpApiTrait for HttpOtpApi {
    async fn verify_otp(&self, email: &str, code: &str) -> Result<VerifyResponse, GatewayError> {
        let url = self.endpoint(&["otp", "verify-otp", email])?;
        debug!(email = %mask_email(email), "POST verify-otp");

        let response = self
            .post_json(url, &VerifyOtpRequest { otp: code })
            .await?;
        Ok(response)
    }

    async fn resend_otp(&self, email: &str) -> Result<ResendResponse, GatewayError> {
        let url = self.endpoint(&["otp", "resend-otp"])?;
        debug!(email = %mask_email(email), "POST resend-otp");

        let response = self.post_json(url, &ResendOtpRequest { email }).await?;
        Ok(response)
    }
}
