use super::{count_from, non_empty, ProfileProvider, RapidApiClient};
use crate::error::FetchError;
use crate::profile::{RawProfile, RelatedAccount};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

/// `Sat Jun 02 19:22:16 +0000 2012`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Twitter/X lookups. The upstream reports `created_at`, so these profiles
/// never go through heuristic estimation.
pub struct TwitterProvider {
    client: RapidApiClient,
}

impl TwitterProvider {
    pub fn new(client: RapidApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileProvider for TwitterProvider {
    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn fetch_profile(&self, username: &str) -> Result<RawProfile, FetchError> {
        info!("Fetching twitter profile for {}", username);
        let body = self
            .client
            .get(self.name(), "/screenname.php", &[("screenname", username)])
            .await?;
        parse_profile(&body, username)
    }
}

pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw.trim(), CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn parse_profile(body: &str, requested: &str) -> Result<RawProfile, FetchError> {
    let json: Value = serde_json::from_str(body)?;

    if let Some(error) = non_empty(json.get("error")) {
        return Err(if error.to_lowercase().contains("not found") {
            FetchError::UpstreamNotFound(error)
        } else {
            FetchError::UpstreamMalformed(error)
        });
    }
    match json.get("status").and_then(Value::as_str) {
        Some("notfound") | Some("suspended") => {
            return Err(FetchError::UpstreamNotFound(format!(
                "Account {requested} is unavailable"
            )));
        }
        _ => {}
    }

    let username = non_empty(json.get("profile")).ok_or_else(|| {
        FetchError::UpstreamMalformed("Response is missing the profile field".to_string())
    })?;

    let creation_timestamp = json
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(parse_created_at);

    let related_accounts = json
        .get("affiliates")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(RelatedAccount {
                        username: non_empty(item.get("screen_name"))?,
                        display_name: non_empty(item.get("name")),
                        avatar_url: non_empty(item.get("avatar")),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RawProfile {
        username,
        display_name: non_empty(json.get("name")).unwrap_or_default(),
        follower_count: count_from(json.get("sub_count")).unwrap_or(0),
        following_count: count_from(json.get("friends")),
        post_count: count_from(json.get("statuses_count")),
        verified: json
            .get("blue_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        avatar_url: non_empty(json.get("avatar")),
        bio: non_empty(json.get("desc")),
        creation_timestamp,
        related_accounts,
    })
}
