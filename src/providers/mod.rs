//! Upstream profile providers
//!
//! Each provider adapts one third-party API into a [`RawProfile`]. The wire
//! parsing lives in a pure `parse_*` function per provider so it can be
//! exercised without the network.

pub mod instagram;
pub mod tiktok;
pub mod twitter;

pub use instagram::InstagramProvider;
pub use tiktok::TikTokProvider;
pub use twitter::TwitterProvider;

use crate::config::{AppConfig, ProviderCredentials};
use crate::error::FetchError;
use crate::profile::RawProfile;
use crate::provider_throttle::ProviderThrottle;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Route slug, e.g. `twitter` for `/api/twitter-age/{username}`
    fn name(&self) -> &'static str;

    async fn fetch_profile(&self, username: &str) -> Result<RawProfile, FetchError>;
}

/// Providers keyed by route slug
pub type ProviderRegistry = BTreeMap<&'static str, Arc<dyn ProfileProvider>>;

/// HTTP plumbing shared by the RapidAPI-hosted providers
#[derive(Clone)]
pub struct RapidApiClient {
    client: Client,
    credentials: ProviderCredentials,
    throttle: ProviderThrottle,
}

impl RapidApiClient {
    pub fn new(
        credentials: ProviderCredentials,
        timeout: Duration,
        throttle: ProviderThrottle,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            credentials,
            throttle,
        })
    }

    /// GET `path` with `query`, returning the body of a successful response
    pub async fn get(
        &self,
        provider: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, FetchError> {
        self.throttle.wait_for(provider).await;

        let url = format!("{}{}", self.credentials.base_url(), path);
        debug!("Calling {} upstream: {}", provider, url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("x-rapidapi-key", &self.credentials.api_key)
            .header("x-rapidapi-host", &self.credentials.api_host)
            .send()
            .await
            .map_err(|e| {
                warn!("{} request failed: {}", provider, e);
                FetchError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::from)?;

        if !status.is_success() {
            warn!("{} upstream returned {}", provider, status);
            return Err(FetchError::from_status(status, &body));
        }

        Ok(body)
    }
}

/// Build every provider that has credentials configured
pub fn build_registry(config: &AppConfig) -> Result<ProviderRegistry, reqwest::Error> {
    let throttle = ProviderThrottle::new(config.provider_min_interval);
    let mut registry: ProviderRegistry = BTreeMap::new();

    if let Some(credentials) = &config.twitter {
        let client =
            RapidApiClient::new(credentials.clone(), config.provider_timeout, throttle.clone())?;
        registry.insert("twitter", Arc::new(TwitterProvider::new(client)));
    }
    if let Some(credentials) = &config.instagram {
        let client =
            RapidApiClient::new(credentials.clone(), config.provider_timeout, throttle.clone())?;
        registry.insert("instagram", Arc::new(InstagramProvider::new(client)));
    }
    if let Some(credentials) = &config.tiktok {
        let client =
            RapidApiClient::new(credentials.clone(), config.provider_timeout, throttle.clone())?;
        registry.insert("tiktok", Arc::new(TikTokProvider::new(client)));
    }

    Ok(registry)
}

/// Treat JSON `null`, missing, numeric and string counts alike
pub(crate) fn count_from(value: Option<&serde_json::Value>) -> Option<u64> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn non_empty(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
