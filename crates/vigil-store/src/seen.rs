//! Persisted set of already-processed targets.
//!
//! The file is a JSON array of `{"url": ..., "timestamp": ...}` objects.
//! Expired entries are compacted away lazily when the store is opened, not on
//! every write. Each entry keeps its original first-seen time across saves,
//! so the retention window measures real age.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use vigil_core::entities::SeenEntry;

use crate::error::StoreError;

/// Seen-item store for one monitored stream.
#[derive(Debug)]
pub struct SeenStore {
    path: PathBuf,
    entries: BTreeMap<String, SeenEntry>,
}

impl SeenStore {
    /// Load the store from `path`, dropping entries older than `retention`.
    ///
    /// Never fails: a missing file yields an empty store, and an unreadable or
    /// undecodable file is logged and treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, retention: TimeDelta) -> Self {
        Self::open_at(path, retention, Utc::now())
    }

    /// [`open`](Self::open) with an explicit clock.
    #[must_use]
    pub fn open_at(path: impl Into<PathBuf>, retention: TimeDelta, now: DateTime<Utc>) -> Self {
        let path = path.into();
        let persisted = match read_entries(&path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(%error, "seen store unreadable; starting empty");
                Vec::new()
            }
        };

        let persisted_len = persisted.len();
        let mut entries = BTreeMap::new();
        for entry in persisted {
            let expired = entry
                .first_seen_at()
                .is_some_and(|seen_at| now - seen_at > retention);
            if !expired {
                entries.entry(entry.target.clone()).or_insert(entry);
            }
        }

        let store = Self { path, entries };
        if store.entries.len() != persisted_len {
            tracing::info!(
                pruned = persisted_len - store.entries.len(),
                kept = store.entries.len(),
                "compacted seen store"
            );
            if let Err(error) = store.save() {
                tracing::warn!(%error, "failed to rewrite compacted seen store");
            }
        }
        store
    }

    /// Whether `target` has already been processed.
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.entries.contains_key(target)
    }

    /// Number of remembered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no targets are remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All remembered entries, ordered by target.
    pub fn entries(&self) -> impl Iterator<Item = &SeenEntry> {
        self.entries.values()
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mark `target` as processed now and persist the store.
    ///
    /// Returns `Ok(false)` without writing if the target was already present;
    /// its original first-seen time is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written. The target stays
    /// marked in memory either way.
    pub fn mark_seen(&mut self, target: &str) -> Result<bool, StoreError> {
        self.mark_seen_at(target, Utc::now())
    }

    /// [`mark_seen`](Self::mark_seen) with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written.
    pub fn mark_seen_at(&mut self, target: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        if self.entries.contains_key(target) {
            return Ok(false);
        }
        self.entries
            .insert(target.to_string(), SeenEntry::new(target, now));
        self.save()?;
        Ok(true)
    }

    /// Write the full set via a temp file and rename.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let entries: Vec<&SeenEntry> = self.entries.values().collect();
        let body =
            serde_json::to_vec_pretty(&entries).map_err(|e| StoreError::json(&self.path, e))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Vec<SeenEntry>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_slice(&raw).map_err(|e| StoreError::json(path, e))
}
