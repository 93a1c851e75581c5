//! Human readable account age

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;
const DAYS_PER_MONTH: i64 = 30;

/// Elapsed time since creation, broken down with 30-day months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAge {
    /// Whole days, rounded up
    pub days: i64,
    pub months: i64,
    pub years: i64,
}

impl AccountAge {
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - created_at).num_milliseconds().unsigned_abs() as i64;
        Self::from_days((elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
    }

    pub fn from_days(days: i64) -> Self {
        let months = days / DAYS_PER_MONTH;
        Self {
            days,
            months,
            years: months / 12,
        }
    }

    pub fn text(&self) -> String {
        if self.years >= 1 {
            let remainder = self.months % 12;
            let mut text = quantity(self.years, "year");
            if remainder > 0 {
                text.push_str(" and ");
                text.push_str(&quantity(remainder, "month"));
            }
            text
        } else if self.months >= 1 {
            quantity(self.months, "month")
        } else {
            quantity(self.days, "day")
        }
    }
}

fn quantity(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s")
    } else {
        format!("{n} {unit}")
    }
}

/// Shorthand for `AccountAge::between(created_at, now).text()`
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    AccountAge::between(created_at, now).text()
}
