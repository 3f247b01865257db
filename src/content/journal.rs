//! # Section Journal
//!
//! Append-only durability for the section store.
//!
//! Every mutation is one framed record: a 4-byte little-endian payload
//! length, a 4-byte CRC32 of the payload, then the JSON payload. Appends are
//! fsynced before the operation is acknowledged. A `Transition` record
//! carries both the new row and the archived history entry, so the
//! dual-write is a single journal append and survives a crash atomically.
//!
//! Replay at open rebuilds the in-memory state. Any checksum mismatch or
//! truncated frame is corruption and fails the open explicitly.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::errors::{ContentError, ContentResult};
use super::section::{HistoryEntry, Section};
use super::store::{MemoryStore, SectionStore};

/// Computes a CRC32 checksum over the provided data.
fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// One journaled mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JournalRecord {
    /// A new section at version 1
    Create { section: Section },
    /// An atomic version transition: archived entry + replacement row
    Transition {
        section: Section,
        entry: HistoryEntry,
    },
}

/// Appends framed records to the journal file with fsync enforcement.
pub struct JournalWriter {
    path: PathBuf,
    file: File,
}

impl JournalWriter {
    /// Opens or creates `<data_dir>/journal/sections.log` for append.
    pub fn open(data_dir: &Path) -> ContentResult<Self> {
        let journal_dir = data_dir.join("journal");
        let path = journal_dir.join("sections.log");

        if !journal_dir.exists() {
            fs::create_dir_all(&journal_dir).map_err(|e| {
                ContentError::Journal(format!(
                    "Failed to create journal directory {}: {}",
                    journal_dir.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                ContentError::Journal(format!(
                    "Failed to open journal file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self { path, file })
    }

    /// Returns the path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record and fsyncs before returning.
    pub fn append(&mut self, record: &JournalRecord) -> ContentResult<()> {
        let payload = serde_json::to_vec(record)
            .map_err(|e| ContentError::Journal(format!("Failed to encode record: {}", e)))?;

        let mut frame = Vec::with_capacity(8 + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&compute_checksum(&payload).to_le_bytes());
        frame.extend_from_slice(&payload);

        self.file
            .write_all(&frame)
            .map_err(|e| ContentError::Journal(format!("Journal append failed: {}", e)))?;

        // fsync is mandatory; acknowledgment before fsync is forbidden
        self.file
            .sync_all()
            .map_err(|e| ContentError::Journal(format!("Journal fsync failed: {}", e)))?;

        Ok(())
    }
}

/// Reads framed records back in append order.
pub struct JournalReader {
    reader: BufReader<File>,
}

impl JournalReader {
    pub fn open(path: &Path) -> ContentResult<Self> {
        let file = File::open(path).map_err(|e| {
            ContentError::Journal(format!(
                "Failed to open journal file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }

    /// Reads the next record, or `None` at a clean end of file.
    ///
    /// A partial frame or checksum mismatch is corruption, never skipped.
    pub fn read_next(&mut self) -> ContentResult<Option<JournalRecord>> {
        let mut header = [0u8; 8];
        match self.reader.read_exact(&mut header[..1]) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => {
                return Err(ContentError::Journal(format!(
                    "Journal read failed: {}",
                    e
                )))
            }
        }
        self.reader
            .read_exact(&mut header[1..])
            .map_err(|_| ContentError::Corruption("truncated record header".to_string()))?;

        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let expected = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        let mut payload = vec![0u8; len];
        self.reader
            .read_exact(&mut payload)
            .map_err(|_| ContentError::Corruption("truncated record payload".to_string()))?;

        if compute_checksum(&payload) != expected {
            return Err(ContentError::Corruption(
                "checksum mismatch in journal record".to_string(),
            ));
        }

        let record = serde_json::from_slice(&payload)
            .map_err(|e| ContentError::Corruption(format!("undecodable record: {}", e)))?;
        Ok(Some(record))
    }
}

/// Durable section store: in-memory working state plus the journal.
///
/// All mutations hold the writer lock end to end, so journal order matches
/// commit order and replay reproduces the exact state. Reads go straight to
/// the in-memory state.
pub struct JournalStore {
    state: MemoryStore,
    writer: Mutex<JournalWriter>,
}

impl JournalStore {
    /// Opens the journal under `data_dir` and replays it into memory.
    pub fn open(data_dir: &Path) -> ContentResult<Self> {
        let writer = JournalWriter::open(data_dir)?;
        let state = MemoryStore::new();

        let journal_len = fs::metadata(writer.path())
            .map_err(|e| ContentError::Journal(format!("Failed to stat journal: {}", e)))?
            .len();
        if journal_len > 0 {
            let mut reader = JournalReader::open(writer.path())?;
            while let Some(record) = reader.read_next()? {
                match record {
                    JournalRecord::Create { section } => state.insert(&section)?,
                    JournalRecord::Transition { section, entry } => {
                        state.commit_transition(&section, &entry)?
                    }
                }
            }
        }

        Ok(Self {
            state,
            writer: Mutex::new(writer),
        })
    }
}

impl SectionStore for JournalStore {
    fn get(&self, key: &str) -> ContentResult<Option<Section>> {
        self.state.get(key)
    }

    fn list(&self) -> ContentResult<Vec<Section>> {
        self.state.list()
    }

    fn insert(&self, section: &Section) -> ContentResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;

        // Validate before journaling so a rejected insert leaves no record
        if self.state.get(&section.key)?.is_some() {
            return Err(ContentError::AlreadyExists(section.key.clone()));
        }

        writer.append(&JournalRecord::Create {
            section: section.clone(),
        })?;
        self.state.insert(section)
    }

    fn get_history(&self, key: &str, version: u64) -> ContentResult<Option<HistoryEntry>> {
        self.state.get_history(key, version)
    }

    fn list_history(&self, key: &str, limit: usize) -> ContentResult<Vec<HistoryEntry>> {
        self.state.list_history(key, limit)
    }

    fn commit_transition(&self, section: &Section, entry: &HistoryEntry) -> ContentResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ContentError::Store("Lock poisoned".to_string()))?;

        // Validate against current state before journaling; a stale
        // transition must fail with no journal record written
        let current = self
            .state
            .get(&section.key)?
            .ok_or_else(|| ContentError::NotFound(section.key.clone()))?;
        if entry.version != current.version || section.version != current.version + 1 {
            return Err(ContentError::Store(format!(
                "transition out of order for '{}': row v{}, archiving v{}, writing v{}",
                section.key, current.version, entry.version, section.version
            )));
        }

        writer.append(&JournalRecord::Transition {
            section: section.clone(),
            entry: entry.clone(),
        })?;
        self.state.commit_transition(section, entry)
    }
}
