#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use vigil_core::capabilities::{Assessor, ContentFetcher, HistoryPage, MessageSource};
use vigil_core::entities::{Message, datetime_to_timestamp};
use vigil_core::errors::CapabilityError;

pub fn ts(now: DateTime<Utc>, secs_ago: i64) -> String {
    datetime_to_timestamp(now - TimeDelta::seconds(secs_ago))
}

pub fn human(id: String, text: &str) -> Message {
    Message {
        id,
        user: Some("U0HUMAN".into()),
        text: text.into(),
        ..Default::default()
    }
}

/// Serves `pages` by cursor (`None` is page 0, `"p{n}"` is page n) and
/// records every outbound action.
#[derive(Default)]
pub struct FakeSource {
    pub pages: Vec<Vec<Message>>,
    pub fail_on_page: Option<usize>,
    pub fail_reply: bool,
    pub fail_markers: HashSet<String>,
    pub fail_direct: HashSet<String>,
    pub history_calls: Mutex<Vec<Option<String>>>,
    pub replies: Mutex<Vec<(String, String, String)>>,
    pub markers: Mutex<Vec<(String, String)>>,
    pub directs: Mutex<Vec<(String, String)>>,
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Vec<Message>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.lock().unwrap().len()
    }

    pub fn replies(&self) -> Vec<(String, String, String)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn markers(&self) -> Vec<(String, String)> {
        self.markers.lock().unwrap().clone()
    }

    pub fn directs(&self) -> Vec<(String, String)> {
        self.directs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSource for FakeSource {
    async fn fetch_history(
        &self,
        _stream_id: &str,
        _oldest: DateTime<Utc>,
        _latest: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, CapabilityError> {
        self.history_calls
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));
        let index = cursor
            .and_then(|c| c.strip_prefix('p'))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        if self.fail_on_page == Some(index) {
            return Err(CapabilityError::failed("slack", "ratelimited"));
        }
        let messages = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| format!("p{}", index + 1));
        Ok(HistoryPage {
            messages,
            next_cursor,
        })
    }

    async fn post_reply(
        &self,
        _stream_id: &str,
        parent_id: &str,
        text: &str,
        blocks: Option<&serde_json::Value>,
    ) -> Result<(), CapabilityError> {
        if self.fail_reply {
            return Err(CapabilityError::failed("slack", "not_in_channel"));
        }
        assert!(blocks.is_some(), "reply should carry blocks");
        self.replies.lock().unwrap().push((
            parent_id.to_string(),
            text.to_string(),
            blocks.map(ToString::to_string).unwrap_or_default(),
        ));
        Ok(())
    }

    async fn add_marker(
        &self,
        _stream_id: &str,
        item_id: &str,
        marker_name: &str,
    ) -> Result<(), CapabilityError> {
        if self.fail_markers.contains(marker_name) {
            return Err(CapabilityError::failed("slack", "invalid_name"));
        }
        self.markers
            .lock()
            .unwrap()
            .push((item_id.to_string(), marker_name.to_string()));
        Ok(())
    }

    async fn send_direct(&self, recipient: &str, text: &str) -> Result<(), CapabilityError> {
        if self.fail_direct.contains(recipient) {
            return Err(CapabilityError::failed("slack", "users_not_found"));
        }
        self.directs
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}

/// Returns canned page text per URL; unknown URLs fail with a 404.
#[derive(Default)]
pub struct FakeFetcher {
    pub pages: HashMap<String, String>,
    pub delay: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn serving(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, text)| ((*url).to_string(), (*text).to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ContentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CapabilityError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CapabilityError::failed("fetch", "HTTP 404"))
    }
}

/// Answers every request with the same text, recording what it was shown.
pub struct FakeAssessor {
    pub reply: String,
    pub seen_texts: Mutex<Vec<String>>,
}

impl FakeAssessor {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen_texts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Assessor for FakeAssessor {
    async fn assess(&self, _url: &str, text: &str) -> Result<String, CapabilityError> {
        self.seen_texts.lock().unwrap().push(text.to_string());
        Ok(self.reply.clone())
    }
}
