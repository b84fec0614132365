//! Freshness classification of a unit relative to "now".

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Units with this many days left or fewer are expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Derived freshness of a unit. Never stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// `days_left` is in `0..=7`; 0 means the unit expires today.
    ExpiringSoon { days_left: i64 },
    Expired { days_overdue: i64 },
}

impl Freshness {
    pub fn is_usable(&self) -> bool {
        !matches!(self, Freshness::Expired { .. })
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Fresh => write!(f, "Fresh"),
            Freshness::ExpiringSoon { days_left } => write!(f, "{} days left", days_left),
            Freshness::Expired { .. } => write!(f, "Expired"),
        }
    }
}

/// Whole days from `now` until the start (00:00 UTC) of `expiry`, rounded up.
///
/// During the expiry day itself the result is 0; it only turns negative once
/// a full day has passed after the start of the expiry date.
pub fn days_until_expiry(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let diff_ms = (start_of_day(expiry) - now).num_milliseconds();
    ceil_div(diff_ms, MILLIS_PER_DAY)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -((-numerator).div_euclid(denominator))
}

/// Classify a unit's expiry date at time `now`.
pub fn classify(expiry: NaiveDate, now: DateTime<Utc>) -> Freshness {
    let days_left = days_until_expiry(expiry, now);
    if days_left < 0 {
        Freshness::Expired {
            days_overdue: -days_left,
        }
    } else if days_left <= EXPIRING_SOON_DAYS {
        Freshness::ExpiringSoon { days_left }
    } else {
        Freshness::Fresh
    }
}

/// Start of `date` in UTC, for callers that reason in calendar days.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
