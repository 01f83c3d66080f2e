//! Per-target pipeline: Fetching, Assessing, Parsing, Notifying, Persisting.
//!
//! Stages only move forward along [`Stage::allowed_next_states`]. A fetch or
//! assessment failure skips straight to Persisting, so every target is marked
//! seen and audited exactly once, whatever happened before. Nothing here
//! returns an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use vigil_config::MarkersConfig;
use vigil_core::capabilities::{Assessor, ContentFetcher, MessageSource};
use vigil_core::entities::{Assessment, AuditRecord};
use vigil_core::enums::{Outcome, Stage};
use vigil_core::errors::CapabilityError;
use vigil_store::{AuditLog, SeenStore};

use crate::classify::classify;
use crate::extract::DiscoveredTarget;
use crate::notify::{self, NotifyContext, NotifyReport};
use crate::sections::parse_sections;
use crate::timeout::within;

/// Result of driving one target through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub target: String,
    pub message_id: String,
    /// Every stage entered, in order.
    pub trail: Vec<Stage>,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<NotifyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineRun {
    /// Whether the run went through Persisting to Done.
    #[must_use]
    pub fn persisted(&self) -> bool {
        self.trail.ends_with(&[Stage::Persisting, Stage::Done])
    }
}

/// Limits and notification targets for the processor.
#[derive(Debug, Clone)]
pub struct ProcessorSettings {
    pub stream_id: String,
    pub stage_timeout: Option<Duration>,
    pub max_content_chars: usize,
    pub recipients: Vec<String>,
    pub markers: MarkersConfig,
}

/// How a run reached Persisting.
enum Ending {
    FetchFailed(CapabilityError),
    AssessFailed(CapabilityError),
    Delivered(Assessment, NotifyReport),
}

/// Stage trail under construction.
struct Trail(Vec<Stage>);

impl Trail {
    fn start() -> Self {
        Self(vec![Stage::Fetching])
    }

    fn current(&self) -> Stage {
        self.0.last().copied().unwrap_or(Stage::Fetching)
    }

    fn advance(&mut self, next: Stage, url: &str) {
        match self.current().advance(next) {
            Ok(stage) => {
                tracing::debug!(url, stage = %stage, "entering stage");
                self.0.push(stage);
            }
            Err(error) => tracing::error!(url, %error, "rejected stage transition"),
        }
    }
}

/// Owns the seen store and audit log for one stream.
pub struct StageProcessor {
    source: Arc<dyn MessageSource>,
    fetcher: Arc<dyn ContentFetcher>,
    assessor: Arc<dyn Assessor>,
    settings: ProcessorSettings,
    seen: SeenStore,
    audit: AuditLog,
}

impl StageProcessor {
    #[must_use]
    pub fn new(
        source: Arc<dyn MessageSource>,
        fetcher: Arc<dyn ContentFetcher>,
        assessor: Arc<dyn Assessor>,
        settings: ProcessorSettings,
        seen: SeenStore,
        audit: AuditLog,
    ) -> Self {
        Self {
            source,
            fetcher,
            assessor,
            settings,
            seen,
            audit,
        }
    }

    #[must_use]
    pub const fn seen(&self) -> &SeenStore {
        &self.seen
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Drive `discovered` through every stage.
    pub async fn process(&mut self, discovered: &DiscoveredTarget) -> PipelineRun {
        let url = discovered.target.as_str();
        tracing::info!(url, "processing target");
        let mut trail = Trail::start();

        let text = match self.fetch(url).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(url, stage = %Stage::Fetching, %error, "fetch failed");
                return self.persist(discovered, trail, Ending::FetchFailed(error));
            }
        };

        trail.advance(Stage::Assessing, url);
        let raw = match self.assess(url, &text).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(url, stage = %Stage::Assessing, %error, "assessment failed");
                return self.persist(discovered, trail, Ending::AssessFailed(error));
            }
        };

        trail.advance(Stage::Parsing, url);
        let assessment = parse_sections(&raw);

        trail.advance(Stage::Notifying, url);
        let decision = classify(&assessment.severity, &assessment.relevance);
        let ctx = NotifyContext {
            stream_id: &self.settings.stream_id,
            message_id: &discovered.message_id,
            target: url,
            markers: &self.settings.markers,
            recipients: &self.settings.recipients,
            timeout: self.settings.stage_timeout,
        };
        let report = notify::deliver(self.source.as_ref(), &ctx, &assessment, decision).await;

        self.persist(discovered, trail, Ending::Delivered(assessment, report))
    }

    async fn fetch(&self, url: &str) -> Result<String, CapabilityError> {
        let text = within("fetch", self.settings.stage_timeout, self.fetcher.fetch(url)).await?;
        if text.trim().is_empty() {
            return Err(CapabilityError::Empty { capability: "fetch" });
        }
        Ok(text)
    }

    async fn assess(&self, url: &str, text: &str) -> Result<String, CapabilityError> {
        let bounded = truncate_chars(text, self.settings.max_content_chars);
        let raw = within(
            "assess",
            self.settings.stage_timeout,
            self.assessor.assess(url, bounded),
        )
        .await?;
        if raw.trim().is_empty() {
            return Err(CapabilityError::Empty {
                capability: "assess",
            });
        }
        Ok(raw)
    }

    /// Mark seen and audit. Failures here are logged and swallowed.
    fn persist(
        &mut self,
        discovered: &DiscoveredTarget,
        mut trail: Trail,
        ending: Ending,
    ) -> PipelineRun {
        let url = discovered.target.as_str();
        trail.advance(Stage::Persisting, url);
        let now = Utc::now();

        if let Err(error) = self.seen.mark_seen_at(url, now) {
            tracing::error!(url, %error, "failed to persist seen target");
        }

        let (outcome, assessment, notify, error) = match ending {
            Ending::FetchFailed(e) => (Outcome::FetchFailed, None, None, Some(e.to_string())),
            Ending::AssessFailed(e) => (Outcome::AssessFailed, None, None, Some(e.to_string())),
            Ending::Delivered(assessment, report) => {
                (Outcome::Delivered, Some(assessment), Some(report), None)
            }
        };
        let record = match &assessment {
            Some(assessment) => AuditRecord::delivered(url, now, assessment.clone()),
            None => AuditRecord::failed(url, now, outcome, error.clone().unwrap_or_default()),
        };
        if let Err(error) = self.audit.append(&record) {
            tracing::error!(url, %error, "failed to append audit record");
        }

        trail.advance(Stage::Done, url);
        tracing::info!(url, outcome = %outcome, "target processed");

        PipelineRun {
            target: discovered.target.clone(),
            message_id: discovered.message_id.clone(),
            trail: trail.0,
            outcome,
            assessment,
            notify,
            error,
        }
    }
}

/// The first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices()
        .nth(max)
        .map_or(text, |(idx, _)| &text[..idx])
}
