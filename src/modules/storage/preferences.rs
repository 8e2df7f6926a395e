use crate::core::error::PreferenceError;
use crate::core::models::{RepeatMode, TrackId};
use crate::core::traits::PreferenceStore;
use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SHUFFLE_KEY: &str = "mp_shuffle";
pub const REPEAT_KEY: &str = "mp_repeat";
pub const DARK_KEY: &str = "mp_dark";
pub const FAVORITES_KEY: &str = "mp_favorites";
pub const RECENTLY_PLAYED_KEY: &str = "recently_played";

/// Typed access to the persisted preference set.
///
/// Reads never fail: a missing or malformed value falls back to its default
/// and the problem is logged.
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn shuffle(&self) -> bool {
        self.read_json(SHUFFLE_KEY).unwrap_or(false)
    }

    pub fn set_shuffle(&mut self, enabled: bool) -> Result<()> {
        self.write_json(SHUFFLE_KEY, &enabled)
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        match self.decode_repeat() {
            Ok(mode) => mode.unwrap_or_default(),
            Err(e) => {
                log::warn!("{}", e);
                RepeatMode::default()
            }
        }
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) -> Result<()> {
        self.store.set(REPEAT_KEY, mode.as_str())
    }

    pub fn dark(&self) -> bool {
        self.read_json(DARK_KEY).unwrap_or(false)
    }

    pub fn set_dark(&mut self, enabled: bool) -> Result<()> {
        self.write_json(DARK_KEY, &enabled)
    }

    pub fn favorites(&self) -> Vec<TrackId> {
        self.read_json(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn set_favorites(&mut self, ids: &[TrackId]) -> Result<()> {
        self.write_json(FAVORITES_KEY, &ids)
    }

    pub fn recently_played(&self) -> Vec<TrackId> {
        self.read_json(RECENTLY_PLAYED_KEY).unwrap_or_default()
    }

    pub fn set_recently_played(&mut self, ids: &[TrackId]) -> Result<()> {
        self.write_json(RECENTLY_PLAYED_KEY, &ids)
    }

    /// Remove stored values that no longer decode, so the defaults they fall
    /// back to stop producing warnings. Returns the keys that were dropped.
    pub fn discard_malformed(&mut self) -> Vec<&'static str> {
        let mut malformed = Vec::new();
        if self.decode_repeat().is_err() {
            malformed.push(REPEAT_KEY);
        }
        for key in [SHUFFLE_KEY, DARK_KEY] {
            if self.decode_json::<bool>(key).is_err() {
                malformed.push(key);
            }
        }
        for key in [FAVORITES_KEY, RECENTLY_PLAYED_KEY] {
            if self.decode_json::<Vec<TrackId>>(key).is_err() {
                malformed.push(key);
            }
        }

        for key in &malformed {
            match self.store.remove(key) {
                Ok(()) => log::warn!("Discarded malformed preference {}", key),
                Err(e) => log::warn!("Could not discard preference {}: {:#}", key, e),
            }
        }
        malformed
    }

    fn decode_repeat(&self) -> Result<Option<RepeatMode>, PreferenceError> {
        let Some(raw) = self.store.get(REPEAT_KEY) else {
            return Ok(None);
        };
        RepeatMode::parse(&raw)
            .map(Some)
            .ok_or(PreferenceError::UnknownValue {
                key: REPEAT_KEY,
                value: raw,
            })
    }

    fn decode_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, PreferenceError> {
        let Some(raw) = self.store.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PreferenceError::Json { key, source })
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        match self.decode_json(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}; using default", e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::json_backend::MemoryPreferenceStore;

    fn prefs_with(entries: &[(&str, &str)]) -> Preferences {
        let mut store = MemoryPreferenceStore::new();
        for (k, v) in entries {
            store.set(k, v).unwrap();
        }
        Preferences::new(Box::new(store))
    }

    #[test]
    fn defaults_when_empty() {
        let prefs = prefs_with(&[]);
        assert!(!prefs.shuffle());
        assert!(!prefs.dark());
        assert_eq!(prefs.repeat_mode(), RepeatMode::None);
        assert!(prefs.favorites().is_empty());
        assert!(prefs.recently_played().is_empty());
    }

    #[test]
    fn reads_values_in_stored_format() {
        let prefs = prefs_with(&[
            ("mp_shuffle", "true"),
            ("mp_repeat", "all"),
            ("mp_dark", "true"),
            ("mp_favorites", r#"["A — X","B — Y"]"#),
        ]);
        assert!(prefs.shuffle());
        assert!(prefs.dark());
        assert_eq!(prefs.repeat_mode(), RepeatMode::All);
        assert_eq!(
            prefs.favorites(),
            vec![TrackId::from("A — X".to_string()), TrackId::from("B — Y".to_string())]
        );
    }

    #[test]
    fn malformed_values_fall_back() {
        let prefs = prefs_with(&[
            ("mp_shuffle", "yes please"),
            ("mp_repeat", "forever"),
            ("recently_played", "{"),
        ]);
        assert!(!prefs.shuffle());
        assert_eq!(prefs.repeat_mode(), RepeatMode::None);
        assert!(prefs.recently_played().is_empty());
    }

    #[test]
    fn discard_malformed_removes_only_bad_keys() {
        let mut prefs = prefs_with(&[
            ("mp_shuffle", "true"),
            ("mp_repeat", "forever"),
            ("mp_favorites", "not json"),
            ("recently_played", "[]"),
        ]);

        let mut dropped = prefs.discard_malformed();
        dropped.sort_unstable();
        assert_eq!(dropped, vec!["mp_favorites", "mp_repeat"]);

        assert!(prefs.store.get("mp_repeat").is_none());
        assert!(prefs.store.get("mp_favorites").is_none());
        assert_eq!(prefs.store.get("mp_shuffle").as_deref(), Some("true"));
        assert!(prefs.discard_malformed().is_empty());
    }

    #[test]
    fn writes_round_trip_through_store() {
        let mut prefs = prefs_with(&[]);
        prefs.set_shuffle(true).unwrap();
        prefs.set_repeat_mode(RepeatMode::One).unwrap();
        prefs.set_dark(true).unwrap();
        let ids = vec![TrackId::new("Song", "Band")];
        prefs.set_recently_played(&ids).unwrap();

        assert!(prefs.shuffle());
        assert_eq!(prefs.repeat_mode(), RepeatMode::One);
        assert!(prefs.dark());
        assert_eq!(prefs.recently_played(), ids);
    }
}
