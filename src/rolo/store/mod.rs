//! # Storage Layer
//!
//! Persistence is a single snapshot holding both stores. The [`SnapshotStore`]
//! trait is the whole contract: load everything at startup, save everything at
//! shutdown.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one JSON file.
//!   - A missing file loads as empty state.
//!   - An unreadable file fails with [`RoloError::CorruptSnapshot`].
//!   - Saves write a temp file and rename it over the target, so a reader
//!     never sees half a snapshot.
//! - [`memory::InMemoryStore`]: For testing without the filesystem. It still
//!   goes through JSON so round-trips are exercised.
//!
//! ## Storage Layout
//!
//! ```text
//! <home>/
//! ├── data.json      # Snapshot: { version, contacts: [...], notes: [...] }
//! └── config.json    # Optional settings (see config.rs)
//! ```

use crate::directory::Directory;
use crate::error::{Result, RoloError};
use crate::notebook::Notebook;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// The full persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub contacts: Directory,
    #[serde(default)]
    pub notes: Notebook,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Directory::default(), Notebook::default())
    }
}

impl Snapshot {
    pub fn new(contacts: Directory, notes: Notebook) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            contacts,
            notes,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot. Any failure, including duplicate contact names or a
    /// version from the future, is reported as `CorruptSnapshot`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(raw).map_err(|e| RoloError::CorruptSnapshot(e.to_string()))?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(RoloError::CorruptSnapshot(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

/// Abstract interface for snapshot persistence.
pub trait SnapshotStore {
    /// Load the last saved snapshot, or empty state if none exists.
    fn load(&self) -> Result<Snapshot>;

    /// Persist the snapshot as one unit.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Position;

    #[test]
    fn round_trips_both_stores() {
        let mut contacts = Directory::new();
        contacts.add("alice", ["friend", "work"]).unwrap();
        contacts.add_value("alice", "phone", "0501234567").unwrap();
        contacts
            .add_birthday("alice", chrono::NaiveDate::from_ymd_opt(1990, 2, 28).unwrap())
            .unwrap();
        contacts.add("bob", ["gym"]).unwrap();

        let mut notes = Notebook::new();
        notes.add("first").unwrap();
        notes.add("second").unwrap();
        notes
            .add_tags(Position::new(2).unwrap(), ["todo"])
            .unwrap();

        let snapshot = Snapshot::new(contacts, notes);
        let loaded = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let loaded = Snapshot::from_json("{}").unwrap();
        assert_eq!(loaded, Snapshot::default());
    }

    #[test]
    fn garbage_is_corrupt() {
        assert!(matches!(
            Snapshot::from_json("not json"),
            Err(RoloError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn duplicate_names_are_corrupt() {
        let raw = r#"{"contacts":[{"name":"a"},{"name":"a"}]}"#;
        assert!(matches!(
            Snapshot::from_json(raw),
            Err(RoloError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn future_versions_are_rejected() {
        assert!(matches!(
            Snapshot::from_json(r#"{"version": 99}"#),
            Err(RoloError::CorruptSnapshot(_))
        ));
    }
}
