pub mod media_handler;
pub mod playback_handler;
pub mod ui_handler;
pub mod voice_handler;

use crate::application::state::AppState;
use crate::core::events::{AppEvent, EventSender, PlaybackEvent, UiEvent};
use crate::core::traits::PlayerSurface;
use crate::modules::input::media_session::MediaSessionBridge;
use crate::modules::input::voice::VoiceControl;
use crate::modules::library::favorites::FavoriteChange;
use crate::modules::navigation::resolver::NavigationResolver;
use crate::modules::storage::preferences::Preferences;
use anyhow::Result;

/// All dependencies that event handlers need to do their work.
///
/// Passed by `&mut` into each handler method, giving handlers access to
/// shared resources without coupling them to the `Application` struct itself.
pub struct HandlerContext<'a> {
    pub state: &'a mut AppState,
    pub event_tx: &'a EventSender,
    pub surface: &'a mut dyn PlayerSurface,
    pub navigation: &'a mut NavigationResolver,
    pub preferences: &'a mut Preferences,
    pub voice: &'a mut VoiceControl,
    pub media: &'a mut MediaSessionBridge,
    pub volume_step: f32,
}

impl<'a> HandlerContext<'a> {
    pub fn emit(&self, event: AppEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }

    pub fn toast(&self, message: &str, emoji: &str) -> Result<()> {
        self.emit(AppEvent::Ui(UiEvent::Toast {
            message: message.to_string(),
            emoji: emoji.to_string(),
        }))
    }

    /// Announce that the resolver started a track.
    fn started(&self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            self.emit(AppEvent::Playback(PlaybackEvent::TrackStarted { index }))?;
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<()> {
        let started = self.navigation.advance(&mut *self.surface);
        self.started(started)
    }

    pub fn retreat(&mut self) -> Result<()> {
        let started = self.navigation.retreat(&mut *self.surface);
        self.started(started)
    }

    /// Manual pick from the list, a panel or a voice command.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let started = self
            .navigation
            .select(index, &mut *self.surface)
            .then_some(index);
        self.started(started)
    }

    /// Like or unlike the track at `index`, persist, and say so.
    pub fn toggle_favorite(&mut self, index: usize) -> Result<()> {
        let Some(track) = self.navigation.track(index) else {
            log::debug!("No track at position {} to favorite", index);
            return Ok(());
        };

        let change = self.state.favorites.toggle(&track.id);
        log::info!(
            "{} {}",
            if change == FavoriteChange::Added { "Liked" } else { "Unliked" },
            track.id
        );

        if let Err(e) = self.preferences.set_favorites(self.state.favorites.as_slice()) {
            log::warn!("Could not save favorites: {:#}", e);
        }

        let (message, emoji) = change.toast();
        self.toast(message, emoji)
    }

    /// Copy the voice session into the view.
    pub fn sync_voice(&mut self) {
        self.state.ui.voice_supported = self.voice.is_supported();
        self.state.ui.voice_listening = self.voice.is_listening();
        self.state.ui.voice_status = self.voice.status().to_string();
    }
}
