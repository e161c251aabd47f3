//! Human-readable elapsed time between two timestamps.
//!
//! One canonical scheme is used everywhere: a compact `y/d/h/m/s`
//! decomposition with 365-day years, non-zero units joined by spaces in
//! descending order, suffixed with `later`. A zero (or negative) elapsed
//! time renders as [`SAME_TIME`].

use chrono::NaiveDateTime;

/// Marker returned when no time elapsed between two timestamps.
pub const SAME_TIME: &str = "same time";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Formats the elapsed time from `earlier` to `later`.
///
/// A negative difference is treated as zero magnitude; passing the
/// timestamps in the wrong order is a caller error, not a panic.
///
/// ```
/// use chrono::NaiveDate;
/// use chronicle_log::duration::difference;
///
/// let t0 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let t1 = t0 + chrono::Duration::seconds(130);
/// assert_eq!(difference(t0, t1), "2m 10s later");
/// ```
pub fn difference(earlier: NaiveDateTime, later: NaiveDateTime) -> String {
    let total = (later - earlier).num_seconds().max(0);
    if total == 0 {
        return SAME_TIME.to_string();
    }

    let (years, rest) = (total / SECONDS_PER_YEAR, total % SECONDS_PER_YEAR);
    let (days, rest) = (rest / SECONDS_PER_DAY, rest % SECONDS_PER_DAY);
    let (hours, rest) = (rest / SECONDS_PER_HOUR, rest % SECONDS_PER_HOUR);
    let (minutes, seconds) = (rest / SECONDS_PER_MINUTE, rest % SECONDS_PER_MINUTE);

    let mut parts = Vec::new();
    for (value, unit) in [
        (years, "y"),
        (days, "d"),
        (hours, "h"),
        (minutes, "m"),
        (seconds, "s"),
    ] {
        if value > 0 {
            parts.push(format!("{value}{unit}"));
        }
    }

    format!("{} later", parts.join(" "))
}
