//! # Versioned Content
//!
//! The versioned content subsystem: current section rows, the append-only
//! history ledger, and the engine that transitions between versions.
//!
//! Invariants:
//! - Monotonic versioning: every transition advances a section's version by
//!   exactly 1, starting from 1 at creation.
//! - Atomic dual-write: archiving the old content and writing the new row
//!   commit together or not at all.
//! - Forward-only rollback: rollback produces a new version whose content
//!   equals an earlier snapshot; it never reuses a version number and never
//!   discards information.

pub mod engine;
pub mod errors;
pub mod journal;
pub mod section;
pub mod store;

pub use engine::VersioningEngine;
pub use errors::{ContentError, ContentResult};
pub use journal::{JournalReader, JournalRecord, JournalStore, JournalWriter};
pub use section::{HistoryEntry, Section};
pub use store::{MemoryStore, SectionStore};
