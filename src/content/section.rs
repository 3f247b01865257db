//! # Section and History Types
//!
//! Core data model for versioned section content.
//!
//! A `Section` is the single current row per key. A `HistoryEntry` is an
//! immutable snapshot of the content that was current immediately before a
//! write superseded it. Per section, history versions form exactly
//! {1 .. current_version - 1} with no gaps and no duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, versioned unit of editable structured content.
///
/// `content` is opaque JSON; this core enforces no schema on its shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique, immutable identity
    pub key: String,
    pub name: String,
    pub section_type: String,
    /// Opaque structured payload, serialized to text at rest
    pub content: Value,
    /// Monotonic per key, starts at 1
    pub version: u64,
    pub published: bool,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Create a new section at version 1 with no history.
    pub fn new(
        key: String,
        name: String,
        section_type: String,
        content: Value,
        actor: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            key,
            name,
            section_type,
            content,
            version: 1,
            published: true,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the successor row for an update, archiving nothing itself.
    ///
    /// Version advances by exactly 1; identity and created_at carry over.
    pub fn next(&self, content: Value, actor: &str) -> Self {
        Self {
            key: self.key.clone(),
            name: self.name.clone(),
            section_type: self.section_type.clone(),
            content,
            version: self.version + 1,
            published: self.published,
            updated_by: actor.to_string(),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// An immutable snapshot of a section's content at a superseded version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub section_key: String,
    /// The version number being archived (current immediately before the write)
    pub version: u64,
    pub content: Value,
    pub updated_by: String,
    pub change_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Archive the current state of `section` under its own version number.
    pub fn archive(section: &Section, actor: &str, summary: Option<String>) -> Self {
        Self {
            section_key: section.key.clone(),
            version: section.version,
            content: section.content.clone(),
            updated_by: actor.to_string(),
            change_summary: summary,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_section_starts_at_version_one() {
        let section = Section::new(
            "hero".to_string(),
            "Hero".to_string(),
            "banner".to_string(),
            json!({"title": "A"}),
            "alice".to_string(),
        );
        assert_eq!(section.version, 1);
        assert!(section.published);
    }

    #[test]
    fn test_next_advances_version_by_one() {
        let section = Section::new(
            "hero".to_string(),
            "Hero".to_string(),
            "banner".to_string(),
            json!({"title": "A"}),
            "alice".to_string(),
        );
        let next = section.next(json!({"title": "B"}), "bob");
        assert_eq!(next.version, 2);
        assert_eq!(next.key, "hero");
        assert_eq!(next.updated_by, "bob");
        assert_eq!(next.created_at, section.created_at);
    }

    #[test]
    fn test_archive_captures_pre_write_state() {
        let section = Section::new(
            "hero".to_string(),
            "Hero".to_string(),
            "banner".to_string(),
            json!({"title": "A"}),
            "alice".to_string(),
        );
        let entry = HistoryEntry::archive(&section, "bob", Some("tweak".to_string()));
        assert_eq!(entry.version, 1);
        assert_eq!(entry.content, json!({"title": "A"}));
        assert_eq!(entry.change_summary.as_deref(), Some("tweak"));
    }

    #[test]
    fn test_section_serialization_round_trip() {
        let section = Section::new(
            "hero".to_string(),
            "Hero".to_string(),
            "banner".to_string(),
            json!({"title": "A", "items": [1, 2, 3]}),
            "alice".to_string(),
        );
        let text = serde_json::to_string(&section).unwrap();
        let parsed: Section = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.key, "hero");
        assert_eq!(parsed.content, section.content);
    }
}
