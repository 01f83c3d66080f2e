//! The polling loop: window, extract, process each target, sleep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vigil_core::capabilities::{Assessor, ContentFetcher, MessageSource};
use vigil_store::{AuditLog, SeenStore, StatePaths};

use crate::error::MonitorError;
use crate::extract::TargetExtractor;
use crate::processor::{PipelineRun, ProcessorSettings, StageProcessor};
use crate::settings::MonitorSettings;
use crate::window::{WindowRequest, fetch_window};

/// Summary of one monitoring iteration.
#[derive(Debug, Clone, Serialize)]
pub struct IterationReport {
    pub stream_id: String,
    /// Messages that survived window filtering.
    pub scanned: usize,
    pub runs: Vec<PipelineRun>,
}

pub struct Monitor {
    source: Arc<dyn MessageSource>,
    extractor: TargetExtractor,
    processor: StageProcessor,
    settings: MonitorSettings,
}

impl Monitor {
    /// Attach to the stream's state files under `settings.state_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Pattern`] if the target pattern fails to
    /// compile.
    pub fn new(
        source: Arc<dyn MessageSource>,
        fetcher: Arc<dyn ContentFetcher>,
        assessor: Arc<dyn Assessor>,
        settings: MonitorSettings,
    ) -> Result<Self, MonitorError> {
        let paths = StatePaths::for_stream(&settings.state_dir, &settings.stream_id);
        let seen = SeenStore::open(&paths.seen, settings.retention);
        let audit = AuditLog::new(&paths.audit);
        tracing::info!(
            channel = %settings.stream_id,
            seen = seen.len(),
            state = %paths.seen.display(),
            "attached to stream state"
        );

        let processor = StageProcessor::new(
            Arc::clone(&source),
            fetcher,
            assessor,
            ProcessorSettings {
                stream_id: settings.stream_id.clone(),
                stage_timeout: settings.stage_timeout,
                max_content_chars: settings.max_content_chars,
                recipients: settings.recipients.clone(),
                markers: settings.markers.clone(),
            },
            seen,
            audit,
        );

        Ok(Self {
            source,
            extractor: TargetExtractor::new()?,
            processor,
            settings,
        })
    }

    #[must_use]
    pub const fn seen(&self) -> &SeenStore {
        self.processor.seen()
    }

    #[must_use]
    pub const fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Run a single iteration against the current time.
    pub async fn run_once(&mut self) -> IterationReport {
        self.run_once_at(Utc::now()).await
    }

    /// Run a single iteration with `now` as the window end.
    pub async fn run_once_at(&mut self, now: DateTime<Utc>) -> IterationReport {
        let request = WindowRequest {
            stream_id: &self.settings.stream_id,
            window: self.settings.retention,
            max_items: self.settings.max_items,
            page_delay: self.settings.page_delay,
            own_user_id: self.settings.own_user_id.as_deref(),
        };
        let messages = fetch_window(self.source.as_ref(), &request, now).await;

        let seen = self.processor.seen();
        let targets = self
            .extractor
            .extract_targets(&messages, |target| seen.contains(target));
        tracing::info!(
            channel = %self.settings.stream_id,
            scanned = messages.len(),
            new = targets.len(),
            "scanned window"
        );

        let mut runs = Vec::with_capacity(targets.len());
        for target in &targets {
            runs.push(self.processor.process(target).await);
        }

        IterationReport {
            stream_id: self.settings.stream_id.clone(),
            scanned: messages.len(),
            runs,
        }
    }

    /// Poll forever, sleeping `poll_interval` between iterations.
    pub async fn run(&mut self) {
        loop {
            let report = self.run_once().await;
            if report.runs.is_empty() {
                tracing::info!(
                    secs = self.settings.poll_interval.as_secs(),
                    "no new targets; sleeping"
                );
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}
