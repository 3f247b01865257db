//! # Section Store
//!
//! Abstraction over the transactional store holding the current row per
//! section plus the append-only history ledger.
//!
//! The two tables live behind one trait because a version transition must
//! commit the history append and the row replacement together or not at
//! all. `commit_transition` is the single atomic entry point for that
//! dual-write; implementations execute it under one critical section.

use std::collections::HashMap;
use std::sync::RwLock;

use super::errors::{ContentError, ContentResult};
use super::section::{HistoryEntry, Section};

/// Trait for section storage operations.
///
/// `commit_transition` is atomic: no caller may observe a state where the
/// row version advanced without the matching history entry, or vice versa.
pub trait SectionStore: Send + Sync {
    /// Get the current row for a section key
    fn get(&self, key: &str) -> ContentResult<Option<Section>>;

    /// List all current rows
    fn list(&self) -> ContentResult<Vec<Section>>;

    /// Insert a brand-new section at version 1
    fn insert(&self, section: &Section) -> ContentResult<()>;

    /// Get a single archived entry by section key and version
    fn get_history(&self, key: &str, version: u64) -> ContentResult<Option<HistoryEntry>>;

    /// List archived entries for a section, newest version first
    fn list_history(&self, key: &str, limit: usize) -> ContentResult<Vec<HistoryEntry>>;

    /// Atomically append `entry` to the history ledger and replace the
    /// current row with `section`.
    ///
    /// Fails without any state change if `entry.version` does not match the
    /// stored current version or `section.version` is not exactly one past
    /// it; an interleaved transition on the same key therefore cannot
    /// produce a gap or a duplicate.
    fn commit_transition(&self, section: &Section, entry: &HistoryEntry) -> ContentResult<()>;
}

/// In-memory section store.
///
/// Backs the unit tests and the journal-backed store's working state. Both
/// maps sit behind a single RwLock so `commit_transition` is one write-lock
/// critical section.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    sections: HashMap<String, Section>,
    history: HashMap<String, Vec<HistoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition to already-locked state.
    fn apply_transition(
        state: &mut StoreState,
        section: &Section,
        entry: &HistoryEntry,
    ) -> ContentResult<()> {
        let current = state
            .sections
            .get(&section.key)
            .ok_or_else(|| ContentError::NotFound(section.key.clone()))?;

        if entry.version != current.version || section.version != current.version + 1 {
            return Err(ContentError::Store(format!(
                "transition out of order for '{}': row v{}, archiving v{}, writing v{}",
                section.key, current.version, entry.version, section.version
            )));
        }

        state
            .history
            .entry(section.key.clone())
            .or_default()
            .push(entry.clone());
        state.sections.insert(section.key.clone(), section.clone());
        Ok(())
    }
}

impl SectionStore for MemoryStore {
    fn get(&self, key: &str) -> ContentResult<Option<Section>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        Ok(state.sections.get(key).cloned())
    }

    fn list(&self) -> ContentResult<Vec<Section>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        let mut sections: Vec<Section> = state.sections.values().cloned().collect();
        sections.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(sections)
    }

    fn insert(&self, section: &Section) -> ContentResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        if state.sections.contains_key(&section.key) {
            return Err(ContentError::AlreadyExists(section.key.clone()));
        }
        state.sections.insert(section.key.clone(), section.clone());
        Ok(())
    }

    fn get_history(&self, key: &str, version: u64) -> ContentResult<Option<HistoryEntry>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        Ok(state
            .history
            .get(key)
            .and_then(|entries| entries.iter().find(|e| e.version == version))
            .cloned())
    }

    fn list_history(&self, key: &str, limit: usize) -> ContentResult<Vec<HistoryEntry>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        let mut entries = state.history.get(key).cloned().unwrap_or_default();
        // Appends are version-ordered, so newest first is a reverse
        entries.sort_by(|a, b| b.version.cmp(&a.version));
        entries.truncate(limit);
        Ok(entries)
    }

    fn commit_transition(&self, section: &Section, entry: &HistoryEntry) -> ContentResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        Self::apply_transition(&mut state, section, entry)
    }
}
