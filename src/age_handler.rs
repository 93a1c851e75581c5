use crate::age_estimator::estimate_profile;
use crate::bot_verification::BotVerifier;
use crate::error::FetchError;
use crate::providers::{ProfileProvider, ProviderRegistry};
use crate::response_formatter::{render, AgeResponse};
use crate::username_validator::validate_username;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

pub const CAPTCHA_HEADER: &str = "x-captcha-token";
const ENDPOINT_SUFFIX: &str = "-age";

#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderRegistry>,
    pub bot_verifier: Option<Arc<dyn BotVerifier>>,
}

impl AppState {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self {
            providers: Arc::new(providers),
            bot_verifier: None,
        }
    }

    pub fn with_bot_verifier(mut self, verifier: Arc<dyn BotVerifier>) -> Self {
        self.bot_verifier = Some(verifier);
        self
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.providers
            .keys()
            .map(|name| format!("/api/{name}{ENDPOINT_SUFFIX}/{{username}}"))
            .collect()
    }
}

#[derive(Deserialize, Default)]
struct AgeRequestBody {
    captcha_token: Option<String>,
}

/// Token from the header, falling back to a JSON body
fn captcha_token(headers: &HeaderMap, body: &Bytes) -> Option<String> {
    if let Some(token) = headers.get(CAPTCHA_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(token.to_string());
    }
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice::<AgeRequestBody>(body)
        .ok()
        .and_then(|b| b.captcha_token)
}

/// `GET|POST /api/{provider}-age/{username}`
pub async fn age_handler(
    State(state): State<AppState>,
    Path((endpoint, username)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(provider) = endpoint
        .strip_suffix(ENDPOINT_SUFFIX)
        .and_then(|name| state.providers.get(name))
        .cloned()
    else {
        debug!("No provider mounted for endpoint {}", endpoint);
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Unknown endpoint", "details": endpoint })),
        )
            .into_response();
    };

    match lookup_age(&state, provider.as_ref(), &username, &headers, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn lookup_age(
    state: &AppState,
    provider: &dyn ProfileProvider,
    username: &str,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<AgeResponse, FetchError> {
    let provider_name = provider.name();
    info!("Age lookup requested: {} on {}", username, provider_name);

    let username = validate_username(username).inspect_err(|e| {
        info!("Rejecting lookup: {}", e);
    })?;

    if let Some(verifier) = &state.bot_verifier {
        verifier
            .verify(captcha_token(headers, body).as_deref())
            .await
            .inspect_err(|e| warn!("Bot verification failed for {}: {}", username, e))?;
    }

    let profile = provider.fetch_profile(username).await.inspect_err(|e| {
        warn!("{} lookup for {} failed: {}", provider_name, username, e);
    })?;

    let now = Utc::now();
    let estimate = estimate_profile(&profile, now);
    debug!(
        "Estimate for {}: {} ({}, {})",
        profile.username,
        estimate.estimated_date.date_naive(),
        estimate.confidence_tier,
        estimate.primary_method
    );

    Ok(render(&profile, &estimate, now))
}

pub async fn root_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": state.endpoints(),
    }))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Routes plus permissive CORS, ready to serve
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/{endpoint}/{username}",
            get(age_handler).post(age_handler),
        )
        .layer(cors)
        .with_state(state)
}
