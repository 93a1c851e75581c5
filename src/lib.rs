pub mod age_estimator;
pub mod age_formatter;
pub mod age_handler;
pub mod bot_verification;
pub mod config;
pub mod error;
pub mod profile;
pub mod provider_throttle;
pub mod providers;
pub mod response_formatter;
pub mod signal_extractors;
pub mod username_validator;

#[cfg(test)]
mod tests;

pub use age_estimator::{estimate, estimate_profile, AgeEstimate, ConfidenceTier};
pub use age_formatter::{format_age, AccountAge};
pub use age_handler::{router, AppState};
pub use config::{AppConfig, ConfigError};
pub use error::FetchError;
pub use profile::{ProfileSignals, RawProfile, RelatedAccount};
pub use provider_throttle::ProviderThrottle;
pub use providers::{build_registry, ProfileProvider, ProviderRegistry};
