use super::{count_from, non_empty, ProfileProvider, RapidApiClient};
use crate::error::FetchError;
use crate::profile::RawProfile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

/// TikTok lookups. `createTime` is only sometimes populated; when it is
/// zero or absent the profile is estimated heuristically.
pub struct TikTokProvider {
    client: RapidApiClient,
}

impl TikTokProvider {
    pub fn new(client: RapidApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileProvider for TikTokProvider {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    async fn fetch_profile(&self, username: &str) -> Result<RawProfile, FetchError> {
        info!("Fetching tiktok profile for {}", username);
        let body = self
            .client
            .get(self.name(), "/user/info", &[("unique_id", username)])
            .await?;
        parse_profile(&body)
    }
}

pub fn parse_profile(body: &str) -> Result<RawProfile, FetchError> {
    let json: Value = serde_json::from_str(body)?;

    let code = json.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code != 0 {
        let msg = non_empty(json.get("msg")).unwrap_or_else(|| format!("code {code}"));
        let lower = msg.to_lowercase();
        return Err(if lower.contains("not exist") || lower.contains("not found") {
            FetchError::UpstreamNotFound(msg)
        } else {
            FetchError::UpstreamMalformed(msg)
        });
    }

    let data = json.get("data");
    let user = data.and_then(|d| d.get("user")).ok_or_else(|| {
        FetchError::UpstreamMalformed("Response has no data.user object".to_string())
    })?;
    let stats = data.and_then(|d| d.get("stats"));

    let username = non_empty(user.get("uniqueId")).ok_or_else(|| {
        FetchError::UpstreamMalformed("User object is missing uniqueId".to_string())
    })?;

    if user.get("privateAccount").and_then(Value::as_bool) == Some(true) {
        return Err(FetchError::UpstreamNotFound(format!(
            "Account {username} is private"
        )));
    }

    let creation_timestamp = count_from(user.get("createTime"))
        .filter(|secs| *secs > 0)
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    let stat = |key: &str| count_from(stats.and_then(|s| s.get(key)));

    Ok(RawProfile {
        display_name: non_empty(user.get("nickname")).unwrap_or_default(),
        follower_count: stat("followerCount").unwrap_or(0),
        following_count: stat("followingCount"),
        post_count: stat("videoCount"),
        verified: user
            .get("verified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        avatar_url: non_empty(user.get("avatarLarger")),
        bio: non_empty(user.get("signature")),
        creation_timestamp,
        related_accounts: Vec::new(),
        username,
    })
}
