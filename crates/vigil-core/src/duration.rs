//! Compact duration strings (`"7d"`, `"24h"`, `"3w"`, `"2m"`).
//!
//! Used for the retention window, which bounds both the message lookback and
//! the seen-item expiry. Parsing never fails: a misconfigured value resolves
//! to a sensible span instead of stopping a long-running monitor.

use chrono::TimeDelta;

/// Count used when the digit run is missing, zero, or does not fit.
const DEFAULT_COUNT: i64 = 7;

/// Days per `m` unit (months are approximated).
const DAYS_PER_MONTH: i64 = 30;

/// Parse a compact duration string into a [`TimeDelta`].
///
/// All ASCII digits form the count and all letters form the unit:
/// `h` hours, `d` days, `w` weeks, `m` months (30 days). Any other or
/// missing unit means days. A missing, zero, or unparsable count becomes 7.
/// Empty or absent input yields 7 days.
#[must_use]
pub fn parse_duration(value: Option<&str>) -> TimeDelta {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return TimeDelta::days(DEFAULT_COUNT);
    };
    let normalized = raw.to_lowercase();

    let digits: String = normalized.chars().filter(char::is_ascii_digit).collect();
    let unit: String = normalized.chars().filter(|c| c.is_alphabetic()).collect();

    let count = digits
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_COUNT);

    let span = match unit.as_str() {
        "h" => TimeDelta::try_hours(count),
        "w" => TimeDelta::try_weeks(count),
        "m" => count
            .checked_mul(DAYS_PER_MONTH)
            .and_then(TimeDelta::try_days),
        _ => TimeDelta::try_days(count),
    };

    span.unwrap_or_else(|| TimeDelta::days(DEFAULT_COUNT))
}
