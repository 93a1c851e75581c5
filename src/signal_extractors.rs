//! Rule-based extractors mapping a single profile attribute to an anchor date
//!
//! Each extractor is a pure function over [`ProfileSignals`] returning at most
//! one [`SignalEstimate`]. Anchor dates stand for assumed platform adoption
//! eras and are policy constants.

use crate::profile::ProfileSignals;
use chrono::{DateTime, NaiveDate, Utc};

pub const USERNAME_METHOD: &str = "Username Pattern";
pub const DISPLAY_NAME_METHOD: &str = "Display Name Pattern";
pub const FOLLOWER_COUNT_METHOD: &str = "Follower Count";

/// Weight given to a signal. Only two levels exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalWeight {
    Low = 1,
    Medium = 2,
}

impl SignalWeight {
    pub fn value(self) -> i64 {
        self as i64
    }
}

/// One extractor's guess at the creation date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEstimate {
    pub inferred_date: DateTime<Utc>,
    pub weight: SignalWeight,
    pub method: &'static str,
}

/// Build an anchor at midnight UTC
pub(crate) fn anchor(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Lexical shapes a username can take, in the order they are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernamePattern {
    /// `abc`, `j0hn42`: 3-8 lowercase letters or digits
    ShortLowercase,
    /// `johnsmith1987`: lowercase letters followed by 1-4 digits
    LettersTrailingDigits,
    /// `john_smith_x`: lowercase alphanumerics joined by underscores
    UnderscoreSeparated,
    /// `john.smith.art`: letters joined by dots, 10 characters or more
    LongDotted,
}

impl UsernamePattern {
    pub const ORDERED: [UsernamePattern; 4] = [
        UsernamePattern::ShortLowercase,
        UsernamePattern::LettersTrailingDigits,
        UsernamePattern::UnderscoreSeparated,
        UsernamePattern::LongDotted,
    ];

    pub fn matches(self, username: &str) -> bool {
        let is_lower_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        match self {
            UsernamePattern::ShortLowercase => {
                (3..=8).contains(&username.len()) && username.chars().all(is_lower_alnum)
            }
            UsernamePattern::LettersTrailingDigits => {
                let letters = username
                    .chars()
                    .take_while(|c| c.is_ascii_lowercase())
                    .count();
                let digits = &username[letters..];
                letters > 0
                    && (1..=4).contains(&digits.len())
                    && digits.chars().all(|c| c.is_ascii_digit())
            }
            UsernamePattern::UnderscoreSeparated => {
                let parts: Vec<&str> = username.split('_').collect();
                parts.len() >= 2
                    && parts
                        .iter()
                        .all(|p| !p.is_empty() && p.chars().all(is_lower_alnum))
            }
            UsernamePattern::LongDotted => {
                let parts: Vec<&str> = username.split('.').collect();
                username.len() >= 10
                    && parts.len() >= 2
                    && parts
                        .iter()
                        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()))
            }
        }
    }

    pub fn anchor_date(self) -> DateTime<Utc> {
        match self {
            UsernamePattern::ShortLowercase => anchor(2012, 6, 1),
            UsernamePattern::LettersTrailingDigits => anchor(2015, 3, 1),
            UsernamePattern::UnderscoreSeparated => anchor(2018, 9, 1),
            UsernamePattern::LongDotted => anchor(2021, 1, 1),
        }
    }

    /// First pattern the username satisfies
    pub fn classify(username: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|p| p.matches(username))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayNamePattern {
    /// `Jane Doe`
    RealName,
    /// Contains a character outside the basic multilingual plane (emoji)
    Emoji,
    /// `gamer2019`
    YearSuffix,
}

impl DisplayNamePattern {
    pub const ORDERED: [DisplayNamePattern; 3] = [
        DisplayNamePattern::RealName,
        DisplayNamePattern::Emoji,
        DisplayNamePattern::YearSuffix,
    ];

    pub fn matches(self, display_name: &str) -> bool {
        match self {
            DisplayNamePattern::RealName => {
                let words: Vec<&str> = display_name.split(' ').collect();
                words.len() == 2 && words.iter().all(|w| is_capitalized_word(w))
            }
            // A UTF-16 surrogate pair is exactly a char above U+FFFF
            DisplayNamePattern::Emoji => display_name.chars().any(|c| c.len_utf16() == 2),
            DisplayNamePattern::YearSuffix => {
                let tail: Vec<char> = display_name.chars().rev().take(4).collect();
                tail.len() == 4
                    && tail.iter().all(|c| c.is_ascii_digit())
                    && matches!((tail[3], tail[2]), ('1', '9') | ('2', '0'))
            }
        }
    }

    pub fn anchor_date(self) -> DateTime<Utc> {
        match self {
            DisplayNamePattern::RealName => anchor(2013, 1, 1),
            DisplayNamePattern::Emoji => anchor(2017, 6, 1),
            DisplayNamePattern::YearSuffix => anchor(2020, 1, 1),
        }
    }

    pub fn classify(display_name: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|p| p.matches(display_name))
    }
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}

/// Follower thresholds, largest first. Counts strictly above a threshold
/// take its anchor; anything else falls through to [`DEFAULT_FOLLOWER_ANCHOR`].
pub const FOLLOWER_THRESHOLDS: [(u64, (i32, u32, u32)); 3] = [
    (1_000_000, (2011, 1, 1)),
    (100_000, (2014, 1, 1)),
    (10_000, (2017, 1, 1)),
];

pub const DEFAULT_FOLLOWER_ANCHOR: (i32, u32, u32) = (2020, 1, 1);

pub fn extract_username(signals: &ProfileSignals) -> Option<SignalEstimate> {
    if signals.username.is_empty() {
        return None;
    }
    UsernamePattern::classify(&signals.username).map(|pattern| SignalEstimate {
        inferred_date: pattern.anchor_date(),
        weight: SignalWeight::Medium,
        method: USERNAME_METHOD,
    })
}

pub fn extract_display_name(signals: &ProfileSignals) -> Option<SignalEstimate> {
    if signals.display_name.is_empty() {
        return None;
    }
    DisplayNamePattern::classify(&signals.display_name).map(|pattern| SignalEstimate {
        inferred_date: pattern.anchor_date(),
        weight: SignalWeight::Medium,
        method: DISPLAY_NAME_METHOD,
    })
}

/// Always yields an estimate
pub fn extract_follower_count(signals: &ProfileSignals) -> SignalEstimate {
    let (year, month, day) = FOLLOWER_THRESHOLDS
        .iter()
        .find(|(threshold, _)| signals.follower_count > *threshold)
        .map(|(_, date)| *date)
        .unwrap_or(DEFAULT_FOLLOWER_ANCHOR);

    SignalEstimate {
        inferred_date: anchor(year, month, day),
        weight: SignalWeight::Low,
        method: FOLLOWER_COUNT_METHOD,
    }
}

/// Run every extractor in priority order: username, display name, followers
pub fn extract_all(signals: &ProfileSignals) -> Vec<SignalEstimate> {
    let mut estimates = Vec::with_capacity(3);
    estimates.extend(extract_username(signals));
    estimates.extend(extract_display_name(signals));
    estimates.push(extract_follower_count(signals));
    estimates
}
