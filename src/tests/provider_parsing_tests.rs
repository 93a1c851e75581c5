use crate::error::FetchError;
use crate::providers::{instagram, tiktok, twitter};
use chrono::{TimeZone, Utc};

#[test]
fn test_twitter_profile_with_created_at() {
    let body = r#"{
        "status": "active",
        "profile": "jack",
        "name": "jack",
        "sub_count": 6500000,
        "friends": 4000,
        "statuses_count": 29000,
        "blue_verified": true,
        "avatar": "https://pbs.twimg.com/jack.jpg",
        "desc": "no state is the best state",
        "created_at": "Tue Mar 21 20:50:14 +0000 2006",
        "affiliates": [
            {"screen_name": "bluesky", "name": "Bluesky", "avatar": "https://pbs.twimg.com/b.jpg"},
            {"name": "missing handle"}
        ]
    }"#;

    let profile = twitter::parse_profile(body, "jack").unwrap();
    assert_eq!(profile.username, "jack");
    assert_eq!(profile.follower_count, 6_500_000);
    assert_eq!(profile.following_count, Some(4000));
    assert_eq!(profile.post_count, Some(29000));
    assert!(profile.verified);
    assert_eq!(
        profile.creation_timestamp,
        Some(Utc.with_ymd_and_hms(2006, 3, 21, 20, 50, 14).unwrap())
    );
    assert_eq!(profile.related_accounts.len(), 1);
    assert_eq!(profile.related_accounts[0].username, "bluesky");
    assert_eq!(
        profile.related_accounts[0].display_name.as_deref(),
        Some("Bluesky")
    );
}

#[test]
fn test_twitter_not_found() {
    let err = twitter::parse_profile(r#"{"error": "User not found"}"#, "ghost").unwrap_err();
    assert!(matches!(err, FetchError::UpstreamNotFound(_)));

    let err = twitter::parse_profile(r#"{"status": "suspended"}"#, "ghost").unwrap_err();
    assert!(matches!(err, FetchError::UpstreamNotFound(_)));
}

#[test]
fn test_twitter_malformed() {
    assert!(matches!(
        twitter::parse_profile("<html>502</html>", "jack"),
        Err(FetchError::UpstreamMalformed(_))
    ));
    assert!(matches!(
        twitter::parse_profile(r#"{"name": "no handle"}"#, "jack"),
        Err(FetchError::UpstreamMalformed(_))
    ));
}

#[test]
fn test_twitter_created_at_formats() {
    assert_eq!(
        twitter::parse_created_at("Sat Jun 02 19:22:16 +0000 2012"),
        Some(Utc.with_ymd_and_hms(2012, 6, 2, 19, 22, 16).unwrap())
    );
    assert_eq!(
        twitter::parse_created_at("2012-06-02T19:22:16Z"),
        Some(Utc.with_ymd_and_hms(2012, 6, 2, 19, 22, 16).unwrap())
    );
    assert_eq!(twitter::parse_created_at("yesterday"), None);
}

#[test]
fn test_instagram_profile_has_no_timestamp() {
    let body = r#"{
        "data": {
            "username": "janedoe",
            "full_name": "Jane Doe",
            "follower_count": 12500,
            "following_count": "310",
            "media_count": 88,
            "is_verified": false,
            "is_private": false,
            "profile_pic_url": "https://cdn.example/p.jpg",
            "biography": ""
        }
    }"#;

    let profile = instagram::parse_profile(body).unwrap();
    assert_eq!(profile.username, "janedoe");
    assert_eq!(profile.display_name, "Jane Doe");
    assert_eq!(profile.follower_count, 12_500);
    assert_eq!(profile.following_count, Some(310));
    assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn.example/p.jpg"));
    assert_eq!(profile.bio, None);
    assert!(profile.creation_timestamp.is_none());
}

#[test]
fn test_instagram_private_account_is_not_found() {
    let body = r#"{"data": {"username": "hidden", "is_private": true}}"#;
    assert!(matches!(
        instagram::parse_profile(body),
        Err(FetchError::UpstreamNotFound(_))
    ));

    let body = r#"{"detail": "User not found"}"#;
    assert!(matches!(
        instagram::parse_profile(body),
        Err(FetchError::UpstreamNotFound(_))
    ));
}

#[test]
fn test_tiktok_create_time() {
    let body = r#"{
        "code": 0,
        "msg": "success",
        "data": {
            "user": {
                "uniqueId": "dancer_01",
                "nickname": "Dancer 🌸",
                "verified": false,
                "createTime": 1577836800
            },
            "stats": {"followerCount": 42000, "followingCount": 12, "videoCount": 300}
        }
    }"#;

    let profile = tiktok::parse_profile(body).unwrap();
    assert_eq!(profile.username, "dancer_01");
    assert_eq!(profile.follower_count, 42_000);
    assert_eq!(profile.post_count, Some(300));
    assert_eq!(
        profile.creation_timestamp,
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_tiktok_zero_create_time_is_ignored() {
    let body = r#"{
        "code": 0,
        "data": {"user": {"uniqueId": "abc", "createTime": 0}, "stats": {}}
    }"#;
    let profile = tiktok::parse_profile(body).unwrap();
    assert!(profile.creation_timestamp.is_none());
    assert_eq!(profile.follower_count, 0);
}

#[test]
fn test_tiktok_error_codes() {
    let body = r#"{"code": 10202, "msg": "user does not exist"}"#;
    assert!(matches!(
        tiktok::parse_profile(body),
        Err(FetchError::UpstreamNotFound(_))
    ));

    let body = r#"{"code": 10221, "msg": "User Not Found"}"#;
    let err = tiktok::parse_profile(body).unwrap_err();
    assert_eq!(err, FetchError::UpstreamNotFound("User Not Found".to_string()));
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

    let body = r#"{"code": -1, "msg": "internal error"}"#;
    assert!(matches!(
        tiktok::parse_profile(body),
        Err(FetchError::UpstreamMalformed(_))
    ));

    let body = r#"{"code": 0, "data": {}}"#;
    assert!(matches!(
        tiktok::parse_profile(body),
        Err(FetchError::UpstreamMalformed(_))
    ));
}
