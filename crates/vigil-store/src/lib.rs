//! # vigil-store
//!
//! Durable per-stream state for the Vigil monitor:
//! - [`SeenStore`]: the set of already-processed targets with first-seen
//!   timestamps, pruned by the retention window on load
//! - [`AuditLog`]: an append-only JSONL log of every terminal pipeline outcome
//!
//! File names derive from the stream identity via [`StatePaths`] so a restart
//! reattaches to the same state.

mod audit;
mod error;
mod seen;

pub use audit::AuditLog;
pub use error::StoreError;
pub use seen::SeenStore;

use std::path::{Path, PathBuf};

/// Locations of the state files for one monitored stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub seen: PathBuf,
    pub audit: PathBuf,
}

impl StatePaths {
    /// Stable per-stream file names under `state_dir`.
    ///
    /// The stream id is reduced to `[A-Za-z0-9_-]` so any identifier maps to a
    /// safe file name.
    #[must_use]
    pub fn for_stream(state_dir: &Path, stream_id: &str) -> Self {
        let key = sanitize(stream_id);
        Self {
            seen: state_dir.join(format!("seen_{key}.json")),
            audit: state_dir.join(format!("audit_{key}.jsonl")),
        }
    }
}

fn sanitize(stream_id: &str) -> String {
    let cleaned: String = stream_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        String::from("default")
    } else {
        cleaned
    }
}
