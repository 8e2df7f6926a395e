use crate::application::state::AppState;
use crate::core::events::UiEvent;
use crate::core::models::TrackDescriptor;
use crate::modules::navigation::resolver::NavigationResolver;
use anyhow::Result;
use std::time::Duration;

/// The host player that owns actual audio output.
///
/// The navigation layer never decodes audio itself: it asks the surface to
/// select a track and falls back to an explicit `play` when needed.
pub trait PlayerSurface {
    /// Select a track through the host's native "pick and play" affordance
    fn select_track(&mut self, track: &TrackDescriptor) -> Result<()>;

    /// Explicitly start or resume whatever is loaded
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Check if the loaded resource is paused (or nothing is loaded)
    fn is_paused(&self) -> bool;

    /// Restart the loaded resource from position zero
    fn restart(&mut self) -> Result<()>;

    /// Resource reference of the track that is playing, or failing that the
    /// one that most recently made progress
    fn active_source(&self) -> Option<String>;

    /// Check if the loaded track has played to its end
    fn has_finished(&self) -> bool;

    /// Set volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Get volume
    fn volume(&self) -> f32;

    /// Elapsed time of the loaded resource
    fn position(&self) -> Duration {
        Duration::ZERO
    }
}

/// Local key-value storage. Last write wins.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Abstraction for UI rendering
pub trait UiRenderer {
    /// Initialize the UI (setup terminal, etc.)
    fn init(&mut self) -> Result<()>;

    /// Cleanup the UI (restore terminal, etc.)
    fn cleanup(&mut self) -> Result<()>;

    /// Render current state
    fn render(&mut self, state: &AppState, navigation: &NavigationResolver) -> Result<()>;

    /// Poll for user input (non-blocking)
    /// Returns events generated from user input
    fn poll_input(&mut self) -> Result<Vec<UiEvent>>;
}

/// A source of spoken-command transcripts.
pub trait SpeechRecognizer {
    fn start(&mut self, language: &str) -> Result<()>;

    fn stop(&mut self);
}

/// Now-playing metadata published to the operating system.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata {
    pub title: String,
    pub artist: String,
    pub artwork: Option<String>,
}

/// OS-level media session (MPRIS, SMTC, Now Playing).
pub trait MediaSessionHost {
    /// Publish metadata, or clear it with `None`
    fn set_metadata(&mut self, metadata: Option<&MediaMetadata>);

    fn set_playback(&mut self, playing: bool);
}
