use super::{Snapshot, SnapshotStore};
use crate::error::{Result, RoloError};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves an unreadable snapshot aside so the next save does not overwrite it.
    /// Returns where the file went.
    pub fn quarantine(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("data.json");
        let target = self.path.with_file_name(format!(
            "{}.corrupt-{}",
            file_name,
            Utc::now().format("%Y%m%d%H%M%S")
        ));
        fs::rename(&self.path, &target)?;
        tracing::warn!(from = %self.path.display(), to = %target.display(), "moved unreadable snapshot aside");
        Ok(target)
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(&parent)?;
        }
        Ok(parent)
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot yet, starting empty");
            return Ok(Snapshot::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot = Snapshot::from_json(&raw).map_err(|e| match e {
            RoloError::CorruptSnapshot(reason) => {
                RoloError::CorruptSnapshot(format!("{}: {}", self.path.display(), reason))
            }
            other => other,
        })?;

        tracing::info!(
            path = %self.path.display(),
            contacts = snapshot.contacts.len(),
            notes = snapshot.notes.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let dir = self.ensure_parent()?;
        let content = snapshot.to_json()?;

        // Atomic write; the temp file never outlives a failed save
        let tmp_path = dir.join(format!(".rolo-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp_path, content).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(RoloError::Io(e));
        }

        tracing::info!(
            path = %self.path.display(),
            contacts = snapshot.contacts.len(),
            notes = snapshot.notes.len(),
            "saved snapshot"
        );
        Ok(())
    }
}
