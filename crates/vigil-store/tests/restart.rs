//! State survives a process restart when reopened through `StatePaths`.

use chrono::{TimeDelta, Utc};
use vigil_core::entities::AuditRecord;
use vigil_core::enums::Outcome;
use vigil_store::{AuditLog, SeenStore, StatePaths};

#[test]
fn reopening_by_stream_reattaches_to_state() {
    let dir = tempfile::tempdir().unwrap();
    let retention = TimeDelta::days(7);

    {
        let paths = StatePaths::for_stream(dir.path(), "C42");
        let mut seen = SeenStore::open(&paths.seen, retention);
        seen.mark_seen("https://example.com/advisory").unwrap();
        AuditLog::new(&paths.audit)
            .append(&AuditRecord::failed(
                "https://example.com/advisory",
                Utc::now(),
                Outcome::FetchFailed,
                "connection reset",
            ))
            .unwrap();
    }

    let paths = StatePaths::for_stream(dir.path(), "C42");
    let seen = SeenStore::open(&paths.seen, retention);
    assert!(seen.contains("https://example.com/advisory"));
    assert_eq!(AuditLog::new(&paths.audit).read_all().unwrap().len(), 1);

    let other = StatePaths::for_stream(dir.path(), "C43");
    assert!(SeenStore::open(&other.seen, retention).is_empty());
}

#[test]
fn entries_expire_after_the_retention_window() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seen.json");
    let start = Utc::now() - TimeDelta::days(10);

    let mut seen = SeenStore::open_at(&path, TimeDelta::days(7), start);
    seen.mark_seen_at("https://old", start).unwrap();
    seen.mark_seen_at("https://recent", Utc::now() - TimeDelta::days(1))
        .unwrap();

    let reopened = SeenStore::open(&path, TimeDelta::days(7));
    assert!(!reopened.contains("https://old"));
    assert!(reopened.contains("https://recent"));
}
