//! # Versioning Engine
//!
//! Orchestrates atomic version transitions over a `SectionStore`.
//!
//! Every update or rollback archives the pre-mutation content as a new
//! history entry and advances the row's version by exactly 1, through the
//! store's atomic `commit_transition`. The store commit is atomic on its
//! own, but the engine's read-compute-write spans two store calls, so
//! transitions on the same key are serialized with a per-key lock. Two
//! concurrent updates can therefore never compute the same next version.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::errors::{ContentError, ContentResult};
use super::section::{HistoryEntry, Section};
use super::store::SectionStore;

/// Versioning engine over a section store.
///
/// Constructed once at process start with its backing store; never
/// retrieved from ambient state.
pub struct VersioningEngine {
    store: Arc<dyn SectionStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl VersioningEngine {
    pub fn new(store: Arc<dyn SectionStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the per-key transition lock, creating it on first use.
    fn key_lock(&self, key: &str) -> ContentResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        Ok(locks.entry(key.to_string()).or_default().clone())
    }

    /// Create a new section at version 1 with no history.
    pub fn create(
        &self,
        key: &str,
        name: &str,
        section_type: &str,
        content: Value,
        actor: &str,
    ) -> ContentResult<Section> {
        let section = Section::new(
            key.to_string(),
            name.to_string(),
            section_type.to_string(),
            content,
            actor.to_string(),
        );
        self.store.insert(&section)?;
        Ok(section)
    }

    /// Get the current row for a section.
    pub fn get(&self, key: &str) -> ContentResult<Section> {
        self.store
            .get(key)?
            .ok_or_else(|| ContentError::NotFound(key.to_string()))
    }

    /// List all current rows.
    pub fn list(&self) -> ContentResult<Vec<Section>> {
        self.store.list()
    }

    /// Apply an update, returning the new version number.
    ///
    /// Archives the current content and replaces the row in one atomic
    /// store commit; no state exists where the version is bumped without a
    /// matching history entry, or vice versa.
    pub fn apply_update(
        &self,
        key: &str,
        new_content: Value,
        actor: &str,
        summary: Option<String>,
    ) -> ContentResult<u64> {
        let lock = self.key_lock(key)?;
        let _guard = lock
            .lock()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;
        self.transition(key, new_content, actor, summary)
    }

    /// Roll back to a strictly earlier version, returning the new version.
    ///
    /// Rollback never reuses the target version number: it archives the
    /// currently-active content and produces `current + 1` whose content
    /// equals the target snapshot. No information is ever discarded.
    pub fn rollback(&self, key: &str, target_version: u64, actor: &str) -> ContentResult<u64> {
        let lock = self.key_lock(key)?;
        let _guard = lock
            .lock()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;

        let current = self
            .store
            .get(key)?
            .ok_or_else(|| ContentError::NotFound(key.to_string()))?;

        // Rolling back to the current or a future version is rejected,
        // not silently accepted as a no-op
        if target_version >= current.version {
            return Err(ContentError::InvalidVersion {
                target: target_version,
                current: current.version,
            });
        }

        let snapshot = self
            .store
            .get_history(key, target_version)?
            .ok_or(ContentError::VersionNotFound(key.to_string(), target_version))?;

        let summary = format!("Rollback from v{} to v{}", current.version, target_version);
        self.transition(key, snapshot.content, actor, Some(summary))
    }

    /// List history entries, newest version first, bounded by `limit`.
    ///
    /// An existing section with no prior versions yields an empty list, not
    /// an error; an unknown key is `NotFound`.
    pub fn list_history(&self, key: &str, limit: usize) -> ContentResult<Vec<HistoryEntry>> {
        if self.store.get(key)?.is_none() {
            return Err(ContentError::NotFound(key.to_string()));
        }
        self.store.list_history(key, limit)
    }

    /// The shared transition path. Caller holds the per-key lock.
    fn transition(
        &self,
        key: &str,
        new_content: Value,
        actor: &str,
        summary: Option<String>,
    ) -> ContentResult<u64> {
        let current = self
            .store
            .get(key)?
            .ok_or_else(|| ContentError::NotFound(key.to_string()))?;

        let entry = HistoryEntry::archive(&current, actor, summary);
        let next = current.next(new_content, actor);
        let new_version = next.version;

        self.store.commit_transition(&next, &entry)?;
        Ok(new_version)
    }
}
