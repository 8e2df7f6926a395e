use crate::core::traits::PreferenceStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORAGE_FILE: &str = "storage.json";

/// Key-value preferences kept in a single JSON object on disk.
///
/// The whole file is rewritten on every `set`, so the last write wins.
pub struct JsonPreferenceStore {
    file_path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Open the store inside `dir`, creating the directory if needed.
    pub fn open_in(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        Self::open(dir.join(STORAGE_FILE))
    }

    pub fn open(file_path: PathBuf) -> Result<Self> {
        let entries = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .with_context(|| format!("failed to read {}", file_path.display()))?;
            match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "Ignoring unreadable preference file {}: {}",
                        file_path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { file_path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn flush(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
