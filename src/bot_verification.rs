//! CAPTCHA token verification against Cloudflare Turnstile

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const TURNSTILE_VERIFY_URL: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[async_trait]
pub trait BotVerifier: Send + Sync {
    /// Err when the token is missing, rejected, or cannot be checked
    async fn verify(&self, token: Option<&str>) -> Result<(), FetchError>;
}

#[derive(Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileVerifier {
    client: Client,
    secret: String,
    verify_url: String,
}

impl TurnstileVerifier {
    pub fn new(secret: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            secret,
            verify_url: TURNSTILE_VERIFY_URL.to_string(),
        })
    }

    pub fn with_verify_url(mut self, url: impl Into<String>) -> Self {
        self.verify_url = url.into();
        self
    }
}

#[async_trait]
impl BotVerifier for TurnstileVerifier {
    async fn verify(&self, token: Option<&str>) -> Result<(), FetchError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Err(FetchError::CaptchaFailed(
                "No CAPTCHA token supplied".to_string(),
            ));
        };

        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                warn!("Turnstile verification request failed: {}", e);
                FetchError::UpstreamUnavailable(format!("CAPTCHA service unreachable: {e}"))
            })?;

        let result: SiteVerifyResponse = response.json().await.map_err(|e| {
            FetchError::UpstreamMalformed(format!("Invalid CAPTCHA service response: {e}"))
        })?;

        if result.success {
            debug!("CAPTCHA token accepted");
            Ok(())
        } else {
            Err(FetchError::CaptchaFailed(result.error_codes.join(", ")))
        }
    }
}
