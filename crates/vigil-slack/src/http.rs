//! Shared HTTP response helpers for the Slack client.
//!
//! Slack reports failures two ways: an HTTP status (429 rate limiting,
//! 5xx) and an `ok: false` envelope on a 200. [`check_response`] handles the
//! first, [`decode_envelope`] the second.

use serde::de::DeserializeOwned;
use vigil_core::rate_limit::retry_after_secs;

use crate::error::SlackError;

/// Check an HTTP response for common error conditions.
///
/// - **429 Too Many Requests** → [`SlackError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`SlackError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SlackError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(SlackError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(SlackError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a Slack `{"ok": ..., "error": ...}` envelope into `T`.
pub fn decode_envelope<T: DeserializeOwned>(
    method: &str,
    body: serde_json::Value,
) -> Result<T, SlackError> {
    let ok = body
        .get("ok")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if !ok {
        let error = body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown_error")
            .to_string();
        return Err(SlackError::Slack {
            method: method.to_string(),
            error,
        });
    }
    serde_json::from_value(body).map_err(|e| SlackError::Parse(format!("{method}: {e}")))
}

/// `Retry-After` in seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    retry_after_secs(
        resp.headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok()),
    )
}
