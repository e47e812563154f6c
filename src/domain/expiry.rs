use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Signed number of days until `expiry`, rounding the difference up to the
/// next whole day. Zero means the record expires later today; negative means
/// it is already past.
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = expiry.signed_duration_since(now).num_milliseconds();
    (diff_ms + MS_PER_DAY - 1).div_euclid(MS_PER_DAY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Critical,
    Warning,
    Safe,
}

impl ExpiryStatus {
    /// Buckets a days-until-expiry value, first match wins.
    pub fn from_days(days: i64) -> Self {
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= 3 {
            ExpiryStatus::Critical
        } else if days <= 7 {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Safe
        }
    }

    /// Status for a record relative to `now`. Any past expiry instant is
    /// `Expired`, even when the ceiling day count is still zero; future
    /// expiries bucket by day count.
    pub fn of(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if expiry < now {
            ExpiryStatus::Expired
        } else {
            Self::from_days(days_until_expiry(expiry, now))
        }
    }
}

/// Normalizes an instant to the end of its calendar day (23:59:59.999 UTC).
/// Applied on every write of `expiry_date`, never implicitly on read.
pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let eod = instant
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time of day");
    Utc.from_utc_datetime(&eod)
}
