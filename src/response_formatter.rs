//! Outward JSON shape of an age lookup

use crate::age_estimator::AgeEstimate;
use crate::age_formatter::AccountAge;
use crate::profile::{RawProfile, RelatedAccount};
use crate::signal_extractors::{SignalEstimate, SignalWeight};
use chrono::{DateTime, Utc};
use serde::Serialize;

const ESTIMATE_NOTE: &str =
    "No verified creation date is available; this is a best-effort guess from public profile signals.";

fn iso_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeBody {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileBody {
    pub username: String,
    pub display_name: String,
    pub follower_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<&RawProfile> for ProfileBody {
    fn from(p: &RawProfile) -> Self {
        Self {
            username: p.username.clone(),
            display_name: p.display_name.clone(),
            follower_count: p.follower_count,
            following_count: p.following_count,
            post_count: p.post_count,
            verified: p.verified,
            avatar_url: p.avatar_url.clone(),
            bio: p.bio.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEstimateBody {
    pub date: String,
    pub confidence: &'static str,
    pub method: &'static str,
}

impl From<&SignalEstimate> for SignalEstimateBody {
    fn from(e: &SignalEstimate) -> Self {
        Self {
            date: iso_date(e.inferred_date),
            confidence: match e.weight {
                SignalWeight::Medium => "medium",
                SignalWeight::Low => "low",
            },
            method: e.method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationDetails {
    pub all_estimates: Vec<SignalEstimateBody>,
    pub note: &'static str,
}

/// Response for a profile whose creation date had to be guessed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedAgeResponse {
    #[serde(flatten)]
    pub profile: ProfileBody,
    pub estimated_creation_date: String,
    pub estimated_creation_date_range: DateRangeBody,
    pub account_age: String,
    pub age_days: i64,
    pub estimation_confidence: String,
    pub estimation_method: &'static str,
    pub accuracy_range: String,
    pub estimation_details: EstimationDetails,
}

/// Response for a profile whose provider reported the creation date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedAgeResponse {
    #[serde(flatten)]
    pub profile: ProfileBody,
    pub creation_date: String,
    pub creation_date_range: DateRangeBody,
    pub account_age: String,
    pub age_days: i64,
    pub estimation_confidence: String,
    pub accuracy_range: String,
    pub related_accounts: Vec<RelatedAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgeResponse {
    Verified(VerifiedAgeResponse),
    Estimated(EstimatedAgeResponse),
}

impl AgeResponse {
    pub fn is_verified(&self) -> bool {
        matches!(self, AgeResponse::Verified(_))
    }
}

pub fn render(profile: &RawProfile, estimate: &AgeEstimate, now: DateTime<Utc>) -> AgeResponse {
    let age = AccountAge::between(estimate.estimated_date, now);
    let range = DateRangeBody {
        start: iso_date(estimate.date_range.start),
        end: iso_date(estimate.date_range.end),
    };

    if estimate.is_authoritative() {
        AgeResponse::Verified(VerifiedAgeResponse {
            profile: ProfileBody::from(profile),
            creation_date: iso_date(estimate.estimated_date),
            creation_date_range: range,
            account_age: age.text(),
            age_days: age.days,
            estimation_confidence: estimate.confidence_tier.to_string(),
            accuracy_range: estimate.accuracy_radius.to_string(),
            related_accounts: profile.related_accounts.clone(),
        })
    } else {
        AgeResponse::Estimated(EstimatedAgeResponse {
            profile: ProfileBody::from(profile),
            estimated_creation_date: iso_date(estimate.estimated_date),
            estimated_creation_date_range: range,
            account_age: age.text(),
            age_days: age.days,
            estimation_confidence: estimate.confidence_tier.to_string(),
            estimation_method: estimate.primary_method,
            accuracy_range: estimate.accuracy_radius.to_string(),
            estimation_details: EstimationDetails {
                all_estimates: estimate
                    .contributing_estimates
                    .iter()
                    .map(SignalEstimateBody::from)
                    .collect(),
                note: ESTIMATE_NOTE,
            },
        })
    }
}
