use crate::modules::input::voice::DEFAULT_VOICE_LANGUAGE;
use crate::modules::library::recently::DEFAULT_RECENT_CAPACITY;
use crate::utils::{APP_NAME, CONFIG_DIR_ENV};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "encore.log";

/// User settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for tracks when none is given on the command line
    pub music_dir: Option<PathBuf>,
    pub recent_capacity: usize,
    pub toast_duration_ms: u64,
    pub retry_delay_ms: u64,
    pub volume_step: f32,
    pub voice_language: String,
    /// Offer the typed voice prompt
    pub voice_input: bool,
    /// Register with the OS media session
    pub media_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            music_dir: None,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            toast_duration_ms: 2600,
            retry_delay_ms: 120,
            volume_step: 0.1,
            voice_language: DEFAULT_VOICE_LANGUAGE.to_string(),
            voice_input: true,
            media_session: true,
        }
    }
}

impl AppConfig {
    /// Read the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Library directory: the explicit one, then the configured one, then the
    /// platform music folder.
    pub fn music_dir(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| self.music_dir.clone())
            .or_else(dirs::audio_dir)
    }
}

/// Directory holding config, preferences and the log file.
pub fn config_root() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let mut path = dirs::config_dir().context("Could not find config directory")?;
    path.push(APP_NAME);
    Ok(path)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.toast_duration(), Duration::from_millis(2600));
        assert_eq!(config.retry_delay(), Duration::from_millis(120));
        assert_eq!(config.voice_language, "en-IN");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "music_dir = \"/srv/music\"\nrecent_capacity = 5\nmedia_session = false\n")
            .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.music_dir, Some(PathBuf::from("/srv/music")));
        assert_eq!(config.recent_capacity, 5);
        assert!(!config.media_session);
        assert_eq!(config.volume_step, 0.1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "recent_capacity = \"many\"").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn explicit_music_dir_wins() {
        let config = AppConfig {
            music_dir: Some(PathBuf::from("/configured")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.music_dir(Some(PathBuf::from("/explicit"))),
            Some(PathBuf::from("/explicit"))
        );
        assert_eq!(config.music_dir(None), Some(PathBuf::from("/configured")));
    }
}
