use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Accessor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Separator between title and artist inside a [`TrackId`].
pub const TRACK_ID_SEPARATOR: &str = " — ";

/// Stable identifier of a track: its title and artist joined together.
///
/// Favorites and the recently-played history store these ids, so they must
/// survive restarts and rescans as long as the tags do not change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(title: &str, artist: &str) -> Self {
        Self(format!("{}{}{}", title.trim(), TRACK_ID_SEPARATOR, artist.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TrackId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only description of one playable item, captured once at startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackDescriptor {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    /// 0-based position in display order.
    pub position: usize,
    /// Reference to the playable resource. Only used for identity matching.
    pub source: String,
    pub artwork: Option<PathBuf>,
}

impl TrackDescriptor {
    pub fn new(position: usize, title: &str, artist: &str, source: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(title, artist),
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
            position,
            source: source.into(),
            artwork: None,
        }
    }

    pub fn with_artwork(mut self, artwork: Option<PathBuf>) -> Self {
        self.artwork = artwork;
        self
    }

    /// Builds a descriptor from an audio file, falling back to the file stem
    /// when the tags cannot be read.
    pub fn from_path(position: usize, path: &Path) -> Self {
        let (title, artist) = match Self::read_tags(path) {
            Ok(tags) => tags,
            Err(e) => {
                log::debug!("No readable tags in {}: {}", path.display(), e);
                (Self::extract_filename(path), String::new())
            }
        };

        Self::new(position, &title, &artist, path.to_string_lossy())
            .with_artwork(Self::find_artwork(path))
    }

    /// Lower-cased "title artist" string used for fuzzy phrase matching.
    pub fn search_key(&self) -> String {
        format!("{} {}", self.title, self.artist).to_lowercase()
    }

    fn read_tags(path: &Path) -> anyhow::Result<(String, String)> {
        let tagged_file = Probe::open(path)?.read()?;
        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
        let title = tag
            .and_then(|t| t.title().map(|s| s.into_owned()))
            .unwrap_or_else(|| Self::extract_filename(path));
        let artist = tag
            .and_then(|t| t.artist().map(|s| s.into_owned()))
            .unwrap_or_default();
        Ok((title, artist))
    }

    fn extract_filename(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }

    fn find_artwork(path: &Path) -> Option<PathBuf> {
        let dir = path.parent()?;
        ["cover.jpg", "cover.png", "folder.jpg", "folder.png"]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artist.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} - {}", self.artist, self.title)
        }
    }
}

/// What happens when the current track ends or the list runs out.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    None,
    One,
    All,
}

impl RepeatMode {
    /// Control-bar cycle order: none -> all -> one -> none.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::None => "none",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Some(RepeatMode::None),
            "one" => Some(RepeatMode::One),
            "all" => Some(RepeatMode::All),
            _ => None,
        }
    }

    /// Label shown on the control bar.
    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::None => "Off",
            RepeatMode::One => "One",
            RepeatMode::All => "All",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a one-time environment check for an optional integration.
///
/// Checked at startup and never re-evaluated.
pub enum Capability<T> {
    Present(T),
    Absent,
}

impl<T> Capability<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Capability::Present(_))
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Capability::Present(inner) => Some(inner),
            Capability::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Capability::Present(inner),
            None => Capability::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_joins_title_and_artist() {
        let track = TrackDescriptor::new(0, " Blue ", "Joni Mitchell", "songs/blue.mp3");
        assert_eq!(track.id.as_str(), "Blue — Joni Mitchell");
        assert_eq!(track.title, "Blue");
    }

    #[test]
    fn repeat_cycle_matches_control_bar_order() {
        assert_eq!(RepeatMode::None.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::None);
    }

    #[test]
    fn repeat_parse_accepts_stored_values() {
        for mode in [RepeatMode::None, RepeatMode::One, RepeatMode::All] {
            assert_eq!(RepeatMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::parse("OFF"), Some(RepeatMode::None));
        assert_eq!(RepeatMode::parse("sometimes"), None);
    }

    #[test]
    fn display_omits_missing_artist() {
        let track = TrackDescriptor::new(3, "Intro", "", "intro.ogg");
        assert_eq!(track.to_string(), "Intro");
    }
}
