use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type ProviderRateLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Spaces outbound calls per provider so the upstream quota is never hit.
/// One request per `min_interval` for each provider name.
#[derive(Clone)]
pub struct ProviderThrottle {
    limiter: Option<Arc<ProviderRateLimiter>>,
}

impl ProviderThrottle {
    /// A zero interval disables throttling
    pub fn new(min_interval: Duration) -> Self {
        let limiter = Quota::with_period(min_interval)
            .map(|quota| Arc::new(RateLimiter::keyed(quota)));
        Self { limiter }
    }

    pub fn disabled() -> Self {
        Self { limiter: None }
    }

    /// Wait until `provider` may be called again
    pub async fn wait_for(&self, provider: &str) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        let key = provider.to_string();
        if let Err(not_until) = limiter.check_key(&key) {
            let wait_time = not_until.wait_time_from(Clock::now(&DefaultClock::default()));
            debug!("Throttling {} call for {:?}", provider, wait_time);
            limiter.until_key_ready(&key).await;
        }
    }
}
