//! Append-only JSONL audit log.
//!
//! One [`AuditRecord`] per line, appended with
//! `serde_jsonlines::append_json_lines`. Records are never rewritten.

use std::path::{Path, PathBuf};

use vigil_core::entities::AuditRecord;

use crate::error::StoreError;

/// Audit log for one monitored stream.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory or file cannot be written.
    pub fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        serde_jsonlines::append_json_lines(&self.path, [record])
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Read every record in append order. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or a line does not
    /// decode.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?
            .collect::<std::io::Result<Vec<AuditRecord>>>()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// The last `limit` records, oldest first.
    ///
    /// # Errors
    ///
    /// See [`read_all`](Self::read_all).
    pub fn tail(&self, limit: usize) -> Result<Vec<AuditRecord>, StoreError> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use vigil_core::entities::Assessment;
    use vigil_core::enums::Outcome;

    #[test]
    fn appends_and_reads_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("state").join("audit.jsonl"));

        let failed = AuditRecord::failed("https://a", Utc::now(), Outcome::FetchFailed, "404");
        let delivered = AuditRecord::delivered(
            "https://b",
            Utc::now(),
            Assessment {
                severity: "amber".into(),
                ..Default::default()
            },
        );
        log.append(&failed).unwrap();
        log.append(&delivered).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records, vec![failed, delivered]);

        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }

    #[test]
    fn missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit.jsonl"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn tail_returns_most_recent_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit.jsonl"));
        for i in 0..5 {
            log.append(&AuditRecord::failed(
                format!("https://{i}"),
                Utc::now(),
                Outcome::AssessFailed,
                "empty",
            ))
            .unwrap();
        }

        let tail = log.tail(2).unwrap();
        let targets: Vec<&str> = tail.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["https://3", "https://4"]);
        assert_eq!(log.tail(50).unwrap().len(), 5);
    }
}
