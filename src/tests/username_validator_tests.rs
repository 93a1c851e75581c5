use crate::error::FetchError;
use crate::username_validator::validate_username;
use axum::http::StatusCode;

#[test]
fn test_valid_usernames() {
    for username in ["abc", "john.smith", "jane_doe_1987", "ABCDEFGHIJKLMNO"] {
        assert_eq!(validate_username(username), Ok(username));
    }
}

#[test]
fn test_length_bounds() {
    assert!(validate_username("ab").is_err());
    assert!(validate_username("a").is_err());
    assert!(validate_username("").is_err());
    assert!(validate_username("abcdefghijklmnop").is_err());
}

#[test]
fn test_invalid_characters_rejected() {
    for username in ["@abc", "john smith", "john-smith", "jöhn", "abc/def"] {
        let err = validate_username(username).unwrap_err();
        assert!(
            matches!(err, FetchError::InvalidInput(_)),
            "{username} should be invalid input"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
