//! Rate-limit hints shared by the HTTP adapters.

/// Wait applied when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Seconds to wait from a raw `Retry-After` header value.
///
/// Only the delta-seconds form is understood; anything else falls back to
/// [`DEFAULT_RETRY_AFTER_SECS`].
#[must_use]
pub fn retry_after_secs(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
