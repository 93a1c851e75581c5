//! Combines weak signals into a single creation-date estimate

use crate::profile::{ProfileSignals, RawProfile};
use crate::signal_extractors::{extract_all, SignalEstimate, SignalWeight};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const DEFAULT_METHOD: &str = "Default";
pub const PROVIDER_METHOD: &str = "Provider Timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::VeryLow => "very_low",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }

    /// Radius of the window drawn around an estimate of this tier
    pub fn accuracy_radius(self) -> AccuracyRadius {
        match self {
            ConfidenceTier::High => AccuracyRadius::ThreeMonths,
            ConfidenceTier::Medium => AccuracyRadius::SixMonths,
            ConfidenceTier::Low | ConfidenceTier::VeryLow => AccuracyRadius::TwelveMonths,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyRadius {
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl AccuracyRadius {
    pub fn months(self) -> i32 {
        match self {
            AccuracyRadius::ThreeMonths => 3,
            AccuracyRadius::SixMonths => 6,
            AccuracyRadius::TwelveMonths => 12,
        }
    }
}

impl fmt::Display for AccuracyRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{} months", self.months())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn around(center: DateTime<Utc>, radius: AccuracyRadius) -> Self {
        Self {
            start: shift_months(center, -radius.months()),
            end: shift_months(center, radius.months()),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Final estimate for one account. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeEstimate {
    pub estimated_date: DateTime<Utc>,
    pub confidence_tier: ConfidenceTier,
    pub accuracy_radius: AccuracyRadius,
    pub primary_method: &'static str,
    pub date_range: DateRange,
    pub contributing_estimates: Vec<SignalEstimate>,
}

impl AgeEstimate {
    /// Wrap a timestamp the provider reported directly
    pub fn authoritative(created_at: DateTime<Utc>) -> Self {
        let tier = ConfidenceTier::High;
        let radius = tier.accuracy_radius();
        Self {
            estimated_date: created_at,
            confidence_tier: tier,
            accuracy_radius: radius,
            primary_method: PROVIDER_METHOD,
            date_range: DateRange::around(created_at, radius),
            contributing_estimates: Vec::new(),
        }
    }

    /// Estimate used when no signal is available at all
    pub fn fallback(now: DateTime<Utc>) -> Self {
        let tier = ConfidenceTier::VeryLow;
        let radius = tier.accuracy_radius();
        Self {
            estimated_date: now,
            confidence_tier: tier,
            accuracy_radius: radius,
            primary_method: DEFAULT_METHOD,
            date_range: DateRange::around(now, radius),
            contributing_estimates: Vec::new(),
        }
    }

    pub fn is_authoritative(&self) -> bool {
        self.confidence_tier == ConfidenceTier::High
    }
}

/// Merge extractor outputs into one estimate.
///
/// The date is the weight-averaged epoch time of all inputs, so the result can
/// fall between eras that no single extractor claimed. Tier and primary method
/// come from the heaviest input; on ties the earliest input in `estimates`
/// wins, which is why callers pass them in extraction order.
pub fn combine(estimates: Vec<SignalEstimate>, now: DateTime<Utc>) -> AgeEstimate {
    let Some(max_weight) = estimates.iter().map(|e| e.weight).max() else {
        debug!("No signals available, using default estimate");
        return AgeEstimate::fallback(now);
    };

    let (weighted_sum, total_weight) = estimates.iter().fold((0i128, 0i128), |(sum, total), e| {
        let w = e.weight.value() as i128;
        (sum + e.inferred_date.timestamp_millis() as i128 * w, total + w)
    });
    let mean_millis = (weighted_sum / total_weight) as i64;
    let estimated_date = DateTime::<Utc>::from_timestamp_millis(mean_millis).unwrap_or(now);

    let tier = if max_weight == SignalWeight::Medium {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };
    let radius = tier.accuracy_radius();

    let primary_method = estimates
        .iter()
        .find(|e| e.weight == max_weight)
        .map(|e| e.method)
        .unwrap_or(DEFAULT_METHOD);

    debug!(
        "Combined {} signals: {} ({}, {})",
        estimates.len(),
        estimated_date.date_naive(),
        tier,
        primary_method
    );

    AgeEstimate {
        estimated_date,
        confidence_tier: tier,
        accuracy_radius: radius,
        primary_method,
        date_range: DateRange::around(estimated_date, radius),
        contributing_estimates: estimates,
    }
}

/// Heuristic estimate from signals alone
pub fn estimate(signals: &ProfileSignals, now: DateTime<Utc>) -> AgeEstimate {
    combine(extract_all(signals), now)
}

/// Estimate for a fetched profile. A provider timestamp always wins over
/// heuristics.
pub fn estimate_profile(profile: &RawProfile, now: DateTime<Utc>) -> AgeEstimate {
    match profile.creation_timestamp {
        Some(created_at) => AgeEstimate::authoritative(created_at),
        None => estimate(&ProfileSignals::from(profile), now),
    }
}

/// Move `date` by `months` calendar months. A day-of-month past the end of the
/// target month rolls over into the following month (Jan 31 + 1 month lands
/// on Mar 3 in a common year). The time of day is kept.
pub fn shift_months(date: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;

    let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
        return date;
    };
    let day_offset = Duration::days(i64::from(date.day0()));
    let shifted = first_of_month.and_time(date.time()) + day_offset;
    shifted.and_utc()
}
