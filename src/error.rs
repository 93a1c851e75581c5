use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to API callers. All of them originate before or during
/// the provider call; estimation itself cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CAPTCHA verification failed: {0}")]
    CaptchaFailed(String),

    #[error("Upstream not found: {0}")]
    UpstreamNotFound(String),

    #[error("Upstream rate limited: {0}")]
    UpstreamRateLimited(String),

    #[error("Upstream authorization expired: {0}")]
    UpstreamAuthExpired(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream returned malformed data: {0}")]
    UpstreamMalformed(String),
}

impl FetchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FetchError::CaptchaFailed(_) => StatusCode::FORBIDDEN,
            FetchError::UpstreamNotFound(_) => StatusCode::NOT_FOUND,
            FetchError::UpstreamRateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            FetchError::UpstreamAuthExpired(_) => StatusCode::FORBIDDEN,
            FetchError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FetchError::UpstreamMalformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed, caller-facing message for the `error` field
    pub fn message(&self) -> &'static str {
        match self {
            FetchError::InvalidInput(_) => "Invalid username format",
            FetchError::CaptchaFailed(_) => "CAPTCHA verification failed",
            FetchError::UpstreamNotFound(_) => "User not found or account is private",
            FetchError::UpstreamRateLimited(_) => "Rate limit exceeded, please try again later",
            FetchError::UpstreamAuthExpired(_) => "API subscription expired or invalid",
            FetchError::UpstreamUnavailable(_) => "Profile service is temporarily unavailable",
            FetchError::UpstreamMalformed(_) => "Invalid response from profile service",
        }
    }

    pub fn details(&self) -> &str {
        match self {
            FetchError::InvalidInput(d)
            | FetchError::CaptchaFailed(d)
            | FetchError::UpstreamNotFound(d)
            | FetchError::UpstreamRateLimited(d)
            | FetchError::UpstreamAuthExpired(d)
            | FetchError::UpstreamUnavailable(d)
            | FetchError::UpstreamMalformed(d) => d,
        }
    }

    /// Classify a non-success upstream status
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let details = format!("HTTP {}: {}", status.as_u16(), truncate(body, 200));
        match status.as_u16() {
            404 => FetchError::UpstreamNotFound(details),
            429 => FetchError::UpstreamRateLimited(details),
            401 | 403 => FetchError::UpstreamAuthExpired(details),
            _ => FetchError::UpstreamUnavailable(details),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::UpstreamMalformed(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::from_status(status, "")
        } else {
            // connect, TLS, timeout
            FetchError::UpstreamUnavailable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::UpstreamMalformed(e.to_string())
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message(),
            "details": self.details(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
