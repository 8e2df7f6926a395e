use crate::core::events::*;
use crate::core::models::RepeatMode;
use crate::modules::library::favorites::Favorites;
use crate::modules::library::recently::RecentlyPlayed;
use crate::modules::ui::toast::ToastQueue;
use std::time::Duration;

/// Everything the renderers draw from, updated from events.
///
/// Track order and the current index live in the navigation resolver; this
/// holds the view of playback plus the user-facing collections.
#[derive(Debug, Clone)]
pub struct AppState {
    pub playback: PlaybackView,
    pub favorites: Favorites,
    pub recent: RecentlyPlayed,
    pub toasts: ToastQueue,
    pub dark: bool,
    pub ui: UiState,
}

#[derive(Debug, Clone)]
pub struct PlaybackView {
    pub now_playing: Option<usize>,
    pub is_paused: bool,
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected_index: Option<usize>,
    pub liked_panel_open: bool,
    pub recent_drawer_open: bool,
    pub voice_supported: bool,
    pub voice_listening: bool,
    pub voice_status: String,
}

impl Default for PlaybackView {
    fn default() -> Self {
        Self {
            now_playing: None,
            is_paused: true,
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::None,
            elapsed: Duration::ZERO,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            playback: PlaybackView::default(),
            favorites: Favorites::default(),
            recent: RecentlyPlayed::default(),
            toasts: ToastQueue::default(),
            dark: false,
            ui: UiState::default(),
        }
    }
}

impl AppState {
    /// Update state based on an event
    pub fn apply_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Playback(pe) => match pe {
                PlaybackEvent::TrackStarted { index } => {
                    self.playback.now_playing = Some(*index);
                    self.playback.is_paused = false;
                    self.playback.elapsed = Duration::ZERO;
                    // Cursor follows playback
                    self.ui.selected_index = Some(*index);
                }
                PlaybackEvent::Paused => {
                    self.playback.is_paused = true;
                }
                PlaybackEvent::Resumed => {
                    self.playback.is_paused = false;
                }
                PlaybackEvent::VolumeChanged { volume } => {
                    self.playback.volume = *volume;
                }
                PlaybackEvent::ShuffleChanged { enabled } => {
                    self.playback.shuffle = *enabled;
                }
                PlaybackEvent::RepeatChanged { mode } => {
                    self.playback.repeat = *mode;
                }
                PlaybackEvent::TrackEnded => {}
            },

            AppEvent::Ui(ue) => match ue {
                UiEvent::SelectionChanged { index } => {
                    self.ui.selected_index = Some(*index);
                }
                UiEvent::LikedPanelToggled => {
                    self.ui.liked_panel_open = !self.ui.liked_panel_open;
                    if self.ui.liked_panel_open {
                        self.ui.recent_drawer_open = false;
                    }
                }
                UiEvent::RecentDrawerToggled => {
                    self.ui.recent_drawer_open = !self.ui.recent_drawer_open;
                    if self.ui.recent_drawer_open {
                        self.ui.liked_panel_open = false;
                    }
                }
                UiEvent::FavoritePicked { .. } => {
                    self.ui.liked_panel_open = false;
                }
                UiEvent::RecentPicked { .. } => {
                    self.ui.recent_drawer_open = false;
                }
                UiEvent::Toast { message, emoji } => {
                    self.toasts.show(message, Some(emoji));
                }
                _ => {}
            },

            AppEvent::Media(_) | AppEvent::Shutdown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_started_moves_cursor_and_unpauses() {
        let mut state = AppState::default();
        state.apply_event(&AppEvent::Playback(PlaybackEvent::TrackStarted { index: 3 }));

        assert_eq!(state.playback.now_playing, Some(3));
        assert!(!state.playback.is_paused);
        assert_eq!(state.ui.selected_index, Some(3));
    }

    #[test]
    fn panels_are_exclusive() {
        let mut state = AppState::default();
        state.apply_event(&AppEvent::Ui(UiEvent::RecentDrawerToggled));
        state.apply_event(&AppEvent::Ui(UiEvent::LikedPanelToggled));

        assert!(state.ui.liked_panel_open);
        assert!(!state.ui.recent_drawer_open);

        state.apply_event(&AppEvent::Ui(UiEvent::FavoritePicked {
            id: "A — B".to_string().into(),
        }));
        assert!(!state.ui.liked_panel_open);
    }

    #[test]
    fn toast_event_queues_text() {
        let mut state = AppState::default();
        state.apply_event(&AppEvent::Ui(UiEvent::Toast {
            message: "Shuffle Enabled".to_string(),
            emoji: "🔀".to_string(),
        }));
        assert_eq!(state.toasts.visible().collect::<Vec<_>>(), vec!["🔀 Shuffle Enabled"]);
    }
}
