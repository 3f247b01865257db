//! Journal Recovery Tests
//!
//! Invariants under test:
//! - Replay reproduces the exact pre-shutdown state
//! - A version transition is one journal record: the history append and the
//!   row replacement survive a crash together or not at all
//! - Corruption is never ignored: a damaged journal fails the open

use std::fs;
use std::sync::Arc;

use sectiondb::content::{ContentError, JournalStore, SectionStore, VersioningEngine};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn journal_path(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("journal/sections.log")
}

fn engine_over(temp: &TempDir) -> VersioningEngine {
    let store = JournalStore::open(temp.path()).unwrap();
    VersioningEngine::new(Arc::new(store))
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn test_replay_reproduces_state() {
    let temp = TempDir::new().unwrap();

    {
        let engine = engine_over(&temp);
        engine
            .create("hero", "Hero", "banner", json!({"title": "A"}), "alice")
            .unwrap();
        engine
            .apply_update("hero", json!({"title": "B"}), "bob", Some("retitle".into()))
            .unwrap();
        engine
            .apply_update("hero", json!({"title": "C"}), "bob", None)
            .unwrap();
        engine.rollback("hero", 1, "carol").unwrap();
        engine
            .create("footer", "Footer", "links", json!({"links": []}), "alice")
            .unwrap();
    }

    // Reopen from the journal alone
    let engine = engine_over(&temp);

    let hero = engine.get("hero").unwrap();
    assert_eq!(hero.version, 4);
    assert_eq!(hero.content, json!({"title": "A"}));
    assert_eq!(hero.updated_by, "carol");

    let history = engine.list_history("hero", 100).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].version, 3);
    assert_eq!(
        history[0].change_summary.as_deref(),
        Some("Rollback from v3 to v1")
    );

    assert_eq!(engine.list().unwrap().len(), 2);
}

#[test]
fn test_replay_is_idempotent_across_reopens() {
    let temp = TempDir::new().unwrap();

    {
        let engine = engine_over(&temp);
        engine
            .create("hero", "Hero", "banner", json!({"n": 0}), "alice")
            .unwrap();
        engine
            .apply_update("hero", json!({"n": 1}), "alice", None)
            .unwrap();
    }

    for _ in 0..3 {
        let store = JournalStore::open(temp.path()).unwrap();
        assert_eq!(store.get("hero").unwrap().unwrap().version, 2);
        assert_eq!(store.list_history("hero", 10).unwrap().len(), 1);
    }
}

// =============================================================================
// Atomic Dual-Write Across Crash
// =============================================================================

/// A truncated trailing record never yields a half-applied transition; the
/// open fails explicitly instead of replaying a partial dual-write.
#[test]
fn test_truncated_tail_fails_open() {
    let temp = TempDir::new().unwrap();

    {
        let engine = engine_over(&temp);
        engine
            .create("hero", "Hero", "banner", json!({"title": "A"}), "alice")
            .unwrap();
        engine
            .apply_update("hero", json!({"title": "B"}), "alice", None)
            .unwrap();
    }

    // Simulate a crash mid-append: chop bytes off the last record
    let path = journal_path(&temp);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 7]).unwrap();

    let result = JournalStore::open(temp.path());
    assert!(matches!(result, Err(ContentError::Corruption(_))));
}

// =============================================================================
// Corruption Detection
// =============================================================================

#[test]
fn test_bit_flip_fails_open() {
    let temp = TempDir::new().unwrap();

    {
        let engine = engine_over(&temp);
        engine
            .create("hero", "Hero", "banner", json!({"title": "A"}), "alice")
            .unwrap();
    }

    let path = journal_path(&temp);
    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    fs::write(&path, bytes).unwrap();

    let result = JournalStore::open(temp.path());
    assert!(matches!(result, Err(ContentError::Corruption(_))));
}

#[test]
fn test_empty_journal_opens_clean() {
    let temp = TempDir::new().unwrap();

    let store = JournalStore::open(temp.path()).unwrap();
    assert!(store.list().unwrap().is_empty());
}
