use crate::api::RoloApi;
use crate::config::RoloConfig;
use crate::error::{Result, RoloError};
use crate::session::Session;
use crate::store::fs::FileStore;
use crate::store::{Snapshot, SnapshotStore};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "ROLO_HOME";

pub struct RoloContext {
    pub api: RoloApi<FileStore>,
    pub config: RoloConfig,
    pub home: PathBuf,
    /// Set when an unreadable snapshot was moved aside at startup.
    pub recovered: Option<Recovery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub reason: String,
    pub moved_to: PathBuf,
}

/// Picks the data directory: explicit flag, then `ROLO_HOME`, then the
/// platform data dir.
pub fn resolve_home(flag: Option<PathBuf>) -> Result<PathBuf> {
    resolve_home_with(flag, std::env::var_os(HOME_ENV).map(PathBuf::from))
}

fn resolve_home_with(flag: Option<PathBuf>, env_home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = flag.or(env_home) {
        return Ok(home);
    }
    let proj_dirs = ProjectDirs::from("com", "rolo", "rolo")
        .ok_or_else(|| RoloError::Config("could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn initialize(home: &Path) -> Result<RoloContext> {
    let config = RoloConfig::load(home)?;
    let store = FileStore::new(home.join(&config.data_file));

    let (snapshot, recovered) = match store.load() {
        Ok(snapshot) => (snapshot, None),
        Err(RoloError::CorruptSnapshot(reason)) => {
            let moved_to = store.quarantine()?;
            (Snapshot::default(), Some(Recovery { reason, moved_to }))
        }
        Err(e) => return Err(e),
    };

    let session = Session::from_snapshot(snapshot, config.reminder_window_days);
    Ok(RoloContext {
        api: RoloApi::new(store, session),
        config,
        home: home.to_path_buf(),
        recovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flag_beats_env() {
        let home = resolve_home_with(Some("/a".into()), Some("/b".into())).unwrap();
        assert_eq!(home, PathBuf::from("/a"));

        let home = resolve_home_with(None, Some("/b".into())).unwrap();
        assert_eq!(home, PathBuf::from("/b"));
    }

    #[test]
    fn fresh_home_starts_empty() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert!(ctx.recovered.is_none());
        assert!(ctx.api.session().contacts.is_empty());
        assert_eq!(ctx.config, RoloConfig::default());
    }

    #[test]
    fn corrupt_snapshot_is_moved_aside() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("data.json"), "not json at all").unwrap();

        let ctx = initialize(temp.path()).unwrap();
        let recovery = ctx.recovered.unwrap();
        assert!(recovery.moved_to.exists());
        assert!(!temp.path().join("data.json").exists());
        assert_eq!(
            fs::read_to_string(&recovery.moved_to).unwrap(),
            "not json at all"
        );
        assert!(ctx.api.session().notes.is_empty());
    }

    #[test]
    fn config_picks_the_data_file() {
        let temp = TempDir::new().unwrap();
        let config = RoloConfig {
            data_file: "book.json".to_string(),
            reminder_window_days: 3,
            ..Default::default()
        };
        config.save(temp.path()).unwrap();

        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.api.store().path(), temp.path().join("book.json"));
        assert_eq!(ctx.api.session().reminder_window_days(), 3);
    }
}
