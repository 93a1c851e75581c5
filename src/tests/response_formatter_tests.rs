use crate::age_estimator::{estimate_profile, AgeEstimate};
use crate::profile::{RawProfile, RelatedAccount};
use crate::response_formatter::{render, AgeResponse};
use chrono::{DateTime, NaiveDate, Utc};

fn now() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn profile(username: &str, display_name: &str, followers: u64) -> RawProfile {
    RawProfile {
        username: username.to_string(),
        display_name: display_name.to_string(),
        follower_count: followers,
        ..RawProfile::default()
    }
}

#[test]
fn test_estimated_response_fields() {
    let profile = profile("abc", "", 0);
    let estimate = estimate_profile(&profile, now());
    let response = render(&profile, &estimate, now());
    assert!(!response.is_verified());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["username"], "abc");
    assert_eq!(json["estimated_creation_date"], "2014-12-11");
    assert_eq!(json["estimated_creation_date_range"]["start"], "2014-06-11");
    assert_eq!(json["estimated_creation_date_range"]["end"], "2015-06-11");
    assert_eq!(json["estimation_confidence"], "medium");
    assert_eq!(json["estimation_method"], "Username Pattern");
    assert_eq!(json["accuracy_range"], "±6 months");

    let all = json["estimation_details"]["all_estimates"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["date"], "2012-06-01");
    assert_eq!(all[0]["confidence"], "medium");
    assert_eq!(all[1]["method"], "Follower Count");
    assert_eq!(all[1]["confidence"], "low");

    assert!(json.get("creation_date").is_none());
    assert!(json.get("related_accounts").is_none());
    assert!(json.get("following_count").is_none());
}

#[test]
fn test_verified_response_fields() {
    let created = NaiveDate::from_ymd_opt(2025, 9, 13)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let mut profile = profile("jack", "jack", 10);
    profile.creation_timestamp = Some(created);
    profile.related_accounts = vec![RelatedAccount {
        username: "bluesky".to_string(),
        display_name: None,
        avatar_url: None,
    }];

    let estimate = estimate_profile(&profile, now());
    let response = render(&profile, &estimate, now());
    assert!(matches!(response, AgeResponse::Verified(_)));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["creation_date"], "2025-09-13");
    assert_eq!(json["creation_date_range"]["start"], "2025-06-13");
    assert_eq!(json["creation_date_range"]["end"], "2025-12-13");
    assert_eq!(json["age_days"], 400);
    assert_eq!(json["account_age"], "1 year and 1 month");
    assert_eq!(json["estimation_confidence"], "high");
    assert_eq!(json["accuracy_range"], "±3 months");
    assert_eq!(json["related_accounts"][0]["username"], "bluesky");
    assert!(json["related_accounts"][0].get("display_name").is_none());
    assert!(json.get("estimation_details").is_none());
}

#[test]
fn test_default_estimate_renders_as_estimate() {
    let profile = profile("abc", "", 0);
    let estimate = AgeEstimate::fallback(now());
    let json = serde_json::to_value(render(&profile, &estimate, now())).unwrap();

    assert_eq!(json["estimation_confidence"], "very_low");
    assert_eq!(json["estimation_method"], "Default");
    assert_eq!(json["accuracy_range"], "±12 months");
    assert_eq!(json["age_days"], 0);
    assert_eq!(json["account_age"], "0 day");
}
