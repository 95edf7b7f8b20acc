use crate::error::{Result, RoloError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REMINDER_WINDOW_DAYS: u32 = 7;
const DEFAULT_MENU_PAUSE_MS: u64 = 600;
const DEFAULT_DATA_FILE: &str = "data.json";
/// Every birthday recurs within this many days, so wider windows add nothing.
pub const MAX_REMINDER_WINDOW_DAYS: u32 = 366;

/// Configuration for rolo, stored in `<home>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoloConfig {
    /// Days ahead `show-birthdays` looks when no window is given
    #[serde(default = "default_reminder_window_days")]
    pub reminder_window_days: u32,

    /// Pause after switching menus, in milliseconds (terminal only)
    #[serde(default = "default_menu_pause_ms")]
    pub menu_pause_ms: u64,

    /// Snapshot file name, relative to the home directory
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_reminder_window_days() -> u32 {
    DEFAULT_REMINDER_WINDOW_DAYS
}

fn default_menu_pause_ms() -> u64 {
    DEFAULT_MENU_PAUSE_MS
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for RoloConfig {
    fn default() -> Self {
        Self {
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
            menu_pause_ms: DEFAULT_MENU_PAUSE_MS,
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}

impl RoloConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RoloConfig = serde_json::from_str(&content)
            .map_err(|e| RoloError::Config(format!("{}: {}", config_path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.reminder_window_days > MAX_REMINDER_WINDOW_DAYS {
            return Err(RoloError::Config(format!(
                "reminder_window_days must be at most {}, got {}",
                MAX_REMINDER_WINDOW_DAYS, self.reminder_window_days
            )));
        }
        let data_file = Path::new(&self.data_file);
        if self.data_file.trim().is_empty() || data_file.is_absolute() || data_file.components().count() != 1 {
            return Err(RoloError::Config(format!(
                "data_file must be a plain file name, got '{}'",
                self.data_file
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoloConfig::default();
        assert_eq!(config.reminder_window_days, 7);
        assert_eq!(config.menu_pause_ms, 600);
        assert_eq!(config.data_file, "data.json");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoloConfig::load(dir.path()).unwrap();
        assert_eq!(config, RoloConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoloConfig {
            reminder_window_days: 14,
            ..Default::default()
        };
        config.save(dir.path()).unwrap();

        let loaded = RoloConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.reminder_window_days, 14);
        assert_eq!(loaded.data_file, "data.json");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"menu_pause_ms": 0}"#).unwrap();

        let loaded = RoloConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.menu_pause_ms, 0);
        assert_eq!(loaded.reminder_window_days, 7);
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(matches!(
            RoloConfig::load(dir.path()),
            Err(RoloError::Config(_))
        ));

        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"data_file": "../elsewhere.json"}"#,
        )
        .unwrap();
        assert!(matches!(
            RoloConfig::load(dir.path()),
            Err(RoloError::Config(_))
        ));
    }

    #[test]
    fn test_reminder_window_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"reminder_window_days": 4294967295}"#,
        )
        .unwrap();
        let err = RoloConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("at most 366"));

        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"reminder_window_days": 366}"#,
        )
        .unwrap();
        assert_eq!(RoloConfig::load(dir.path()).unwrap().reminder_window_days, 366);
    }
}
