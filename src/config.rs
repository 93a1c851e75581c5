//! Process configuration, read once from the environment at startup

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No provider configured: set at least one of TWITTER_API_KEY, INSTAGRAM_API_KEY, TIKTOK_API_KEY")]
    NoProviders,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Credentials and endpoint for one RapidAPI-style upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub api_key: String,
    pub api_host: String,
}

impl ProviderCredentials {
    pub fn base_url(&self) -> String {
        if self.api_host.starts_with("http://") || self.api_host.starts_with("https://") {
            self.api_host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.api_host)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub twitter: Option<ProviderCredentials>,
    pub instagram: Option<ProviderCredentials>,
    pub tiktok: Option<ProviderCredentials>,
    /// Minimum spacing between two calls to the same provider
    pub provider_min_interval: Duration,
    pub provider_timeout: Duration,
    pub turnstile_secret: Option<String>,
}

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_TWITTER_HOST: &str = "twitter-api45.p.rapidapi.com";
pub const DEFAULT_INSTAGRAM_HOST: &str = "instagram-scraper-api2.p.rapidapi.com";
pub const DEFAULT_TIKTOK_HOST: &str = "tiktok-scraper7.p.rapidapi.com";

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; `from_env` is the production
    /// caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: bind_addr_raw.clone(),
            })?;

        let provider = |key_var: &str, host_var: &str, default_host: &str| {
            get(key_var).map(|api_key| ProviderCredentials {
                api_key,
                api_host: get(host_var).unwrap_or_else(|| default_host.to_string()),
            })
        };

        let twitter = provider("TWITTER_API_KEY", "TWITTER_API_HOST", DEFAULT_TWITTER_HOST);
        let instagram = provider(
            "INSTAGRAM_API_KEY",
            "INSTAGRAM_API_HOST",
            DEFAULT_INSTAGRAM_HOST,
        );
        let tiktok = provider("TIKTOK_API_KEY", "TIKTOK_API_HOST", DEFAULT_TIKTOK_HOST);

        if twitter.is_none() && instagram.is_none() && tiktok.is_none() {
            return Err(ConfigError::NoProviders);
        }

        let provider_min_interval =
            Duration::from_millis(parse_u64(&get, "PROVIDER_MIN_INTERVAL_MS", 1000)?);
        let provider_timeout = Duration::from_secs(parse_u64(&get, "PROVIDER_TIMEOUT_SECS", 15)?);

        Ok(Self {
            bind_addr,
            twitter,
            instagram,
            tiktok,
            provider_min_interval,
            provider_timeout,
            turnstile_secret: get("TURNSTILE_SECRET_KEY"),
        })
    }

    pub fn configured_providers(&self) -> Vec<&'static str> {
        [
            ("twitter", self.twitter.is_some()),
            ("instagram", self.instagram.is_some()),
            ("tiktok", self.tiktok.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some(name))
        .collect()
    }
}

fn parse_u64<G>(get: &G, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
