//! Retrieval of the trailing message window.
//!
//! Pages arrive newest first, so the first message older than the window
//! start ends the pass without fetching further pages.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use vigil_core::capabilities::MessageSource;
use vigil_core::entities::Message;

/// Parameters for one window pass.
#[derive(Debug, Clone)]
pub struct WindowRequest<'a> {
    pub stream_id: &'a str,
    pub window: TimeDelta,
    /// Stop once this many messages are kept. 0 means unbounded.
    pub max_items: usize,
    pub page_delay: Duration,
    pub own_user_id: Option<&'a str>,
}

/// Collect top-level, human-authored messages posted within
/// `[now - window, now]`, newest first.
///
/// Never fails: a source error ends the pass and whatever was gathered so far
/// is returned.
pub async fn fetch_window(
    source: &dyn MessageSource,
    request: &WindowRequest<'_>,
    now: DateTime<Utc>,
) -> Vec<Message> {
    let oldest = now - request.window;
    let mut kept = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0_usize;

    loop {
        let page = match source
            .fetch_history(request.stream_id, oldest, now, cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(
                    channel = request.stream_id,
                    pages,
                    kept = kept.len(),
                    %error,
                    "history fetch failed; using partial window"
                );
                break;
            }
        };
        pages += 1;
        if page.messages.is_empty() {
            break;
        }

        let mut reached_cutoff = false;
        for message in page.messages {
            let Some(posted_at) = message.posted_at() else {
                tracing::debug!(id = %message.id, "skipping message with unparsable timestamp");
                continue;
            };
            if posted_at < oldest {
                reached_cutoff = true;
                break;
            }
            if posted_at > now
                || message.is_bot_message(request.own_user_id)
                || message.is_thread_reply()
            {
                continue;
            }

            kept.push(message);
            if request.max_items > 0 && kept.len() >= request.max_items {
                tracing::debug!(channel = request.stream_id, pages, "message cap reached");
                return kept;
            }
        }

        if reached_cutoff {
            break;
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
        if !request.page_delay.is_zero() {
            tokio::time::sleep(request.page_delay).await;
        }
    }

    tracing::debug!(channel = request.stream_id, pages, kept = kept.len(), "window fetched");
    kept
}
