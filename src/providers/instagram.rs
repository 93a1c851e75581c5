use super::{count_from, non_empty, ProfileProvider, RapidApiClient};
use crate::error::FetchError;
use crate::profile::RawProfile;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Instagram lookups. The upstream exposes no creation date, so every
/// profile is estimated heuristically.
pub struct InstagramProvider {
    client: RapidApiClient,
}

impl InstagramProvider {
    pub fn new(client: RapidApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileProvider for InstagramProvider {
    fn name(&self) -> &'static str {
        "instagram"
    }

    async fn fetch_profile(&self, username: &str) -> Result<RawProfile, FetchError> {
        info!("Fetching instagram profile for {}", username);
        let body = self
            .client
            .get(self.name(), "/v1/info", &[("username_or_id_or_url", username)])
            .await?;
        parse_profile(&body)
    }
}

pub fn parse_profile(body: &str) -> Result<RawProfile, FetchError> {
    let json: Value = serde_json::from_str(body)?;

    let Some(data) = json.get("data").filter(|d| d.is_object()) else {
        let detail = non_empty(json.get("detail"))
            .or_else(|| non_empty(json.get("message")))
            .unwrap_or_else(|| "Response has no data object".to_string());
        return Err(if detail.to_lowercase().contains("not found") {
            FetchError::UpstreamNotFound(detail)
        } else {
            FetchError::UpstreamMalformed(detail)
        });
    };

    let username = non_empty(data.get("username")).ok_or_else(|| {
        FetchError::UpstreamMalformed("Profile data is missing username".to_string())
    })?;

    if data.get("is_private").and_then(Value::as_bool) == Some(true) {
        return Err(FetchError::UpstreamNotFound(format!(
            "Account {username} is private"
        )));
    }

    Ok(RawProfile {
        display_name: non_empty(data.get("full_name")).unwrap_or_default(),
        follower_count: count_from(data.get("follower_count")).unwrap_or(0),
        following_count: count_from(data.get("following_count")),
        post_count: count_from(data.get("media_count")),
        verified: data
            .get("is_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        avatar_url: non_empty(data.get("profile_pic_url_hd"))
            .or_else(|| non_empty(data.get("profile_pic_url"))),
        bio: non_empty(data.get("biography")),
        creation_timestamp: None,
        related_accounts: Vec::new(),
        username,
    })
}
