use crate::age_formatter::{format_age, AccountAge};
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn now() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
        .and_utc()
}

fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

#[test]
fn test_year_and_month() {
    let age = AccountAge::between(days_ago(400), now());
    assert_eq!(age.days, 400);
    assert_eq!(age.months, 13);
    assert_eq!(age.years, 1);
    assert_eq!(age.text(), "1 year and 1 month");
}

#[test]
fn test_months_only() {
    assert_eq!(format_age(days_ago(45), now()), "1 month");
    assert_eq!(format_age(days_ago(90), now()), "3 months");
}

#[test]
fn test_days_only() {
    assert_eq!(format_age(days_ago(5), now()), "5 days");
    assert_eq!(format_age(days_ago(1), now()), "1 day");
}

#[test]
fn test_whole_years_omit_month_clause() {
    assert_eq!(format_age(days_ago(360), now()), "1 year");
    assert_eq!(format_age(days_ago(800), now()), "2 years and 2 months");
}

#[test]
fn test_partial_days_round_up() {
    let created = now() - Duration::days(5) - Duration::hours(1);
    assert_eq!(AccountAge::between(created, now()).days, 6);
}

#[test]
fn test_future_dates_use_absolute_elapsed_time() {
    let created = now() + Duration::days(45);
    assert_eq!(AccountAge::between(created, now()).days, 45);
    assert_eq!(format_age(created, now()), "1 month");
}

#[test]
fn test_from_days_uses_thirty_day_months() {
    let age = AccountAge::from_days(365);
    assert_eq!(age.months, 12);
    assert_eq!(age.years, 1);
    assert_eq!(age.text(), "1 year");
}
