//! Normalized profile records shared by every provider

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A profile as returned by one of the upstream providers, after adapting
/// its wire format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProfile {
    pub username: String,
    pub display_name: String,
    pub follower_count: u64,
    pub following_count: Option<u64>,
    pub post_count: Option<u64>,
    pub verified: bool,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    /// Creation time reported by the provider itself. When present, no
    /// heuristic estimation takes place.
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub related_accounts: Vec<RelatedAccount>,
}

/// Another account the provider associates with the looked-up one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedAccount {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The indirect signals the heuristic extractors work from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSignals {
    pub username: String,
    pub display_name: String,
    pub follower_count: u64,
}

impl ProfileSignals {
    pub fn new(
        username: impl Into<String>,
        display_name: impl Into<String>,
        follower_count: u64,
    ) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            follower_count,
        }
    }
}

impl From<&RawProfile> for ProfileSignals {
    fn from(profile: &RawProfile) -> Self {
        Self {
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            follower_count: profile.follower_count,
        }
    }
}
