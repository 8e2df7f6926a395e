use crate::core::events::{AppEvent, EventSender, MediaAction, UiEvent};
use crate::core::models::{Capability, TrackDescriptor};
use crate::core::traits::{MediaMetadata, MediaSessionHost};
use crate::utils::APP_NAME;
use anyhow::{Result, anyhow};
use souvlaki::{MediaControlEvent, MediaControls, MediaPlayback, PlatformConfig};

/// Keeps the OS media session in step with playback.
///
/// Inert when no host could be created.
pub struct MediaSessionBridge {
    host: Capability<Box<dyn MediaSessionHost>>,
    published: Option<MediaMetadata>,
}

impl MediaSessionBridge {
    pub fn new(host: Capability<Box<dyn MediaSessionHost>>) -> Self {
        Self {
            host,
            published: None,
        }
    }

    pub fn inert() -> Self {
        Self::new(Capability::Absent)
    }

    pub fn is_active(&self) -> bool {
        self.host.is_present()
    }

    /// Publish the current track, or clear the session with `None`.
    pub fn reflect_track(&mut self, track: Option<&TrackDescriptor>) {
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let metadata = track.map(metadata_for);
        if metadata == self.published {
            return;
        }

        host.set_metadata(metadata.as_ref());
        self.published = metadata;
    }

    pub fn reflect_playback(&mut self, playing: bool) {
        if let Some(host) = self.host.as_mut() {
            host.set_playback(playing);
        }
    }

    pub fn published(&self) -> Option<&MediaMetadata> {
        self.published.as_ref()
    }
}

pub fn metadata_for(track: &TrackDescriptor) -> MediaMetadata {
    let title = if track.title.is_empty() {
        "Unknown".to_string()
    } else {
        track.title.clone()
    };

    MediaMetadata {
        title,
        artist: track.artist.clone(),
        artwork: track
            .artwork
            .as_ref()
            .map(|path| format!("file://{}", path.display())),
    }
}

/// What an OS media action means inside the player.
pub fn action_event(action: MediaAction) -> UiEvent {
    match action {
        MediaAction::Play => UiEvent::ResumeRequested,
        MediaAction::Pause => UiEvent::PauseRequested,
        MediaAction::Toggle => UiEvent::TogglePauseRequested,
        MediaAction::Previous => UiEvent::PreviousTrackRequested,
        MediaAction::Next => UiEvent::NextTrackRequested,
    }
}

/// MPRIS / SMTC / Now Playing through souvlaki.
pub struct SouvlakiHost {
    controls: MediaControls,
}

impl SouvlakiHost {
    /// Register with the OS and forward its actions onto the event bus.
    pub fn new(event_tx: EventSender) -> Result<Self> {
        let config = PlatformConfig {
            display_name: "Encore",
            dbus_name: APP_NAME,
            hwnd: None,
        };

        let mut controls = MediaControls::new(config)
            .map_err(|e| anyhow!("failed to create media controls: {:?}", e))?;

        controls
            .attach(move |event: MediaControlEvent| {
                let action = match event {
                    MediaControlEvent::Play => MediaAction::Play,
                    MediaControlEvent::Pause => MediaAction::Pause,
                    MediaControlEvent::Toggle => MediaAction::Toggle,
                    MediaControlEvent::Previous => MediaAction::Previous,
                    MediaControlEvent::Next => MediaAction::Next,
                    other => {
                        log::debug!("Ignoring media event {:?}", other);
                        return;
                    }
                };
                if event_tx.send(AppEvent::Media(action)).is_err() {
                    log::debug!("Event bus closed, dropping media action {:?}", action);
                }
            })
            .map_err(|e| anyhow!("failed to attach media controls: {:?}", e))?;

        Ok(Self { controls })
    }
}

impl MediaSessionHost for SouvlakiHost {
    fn set_metadata(&mut self, metadata: Option<&MediaMetadata>) {
        let result = match metadata {
            Some(m) => self.controls.set_metadata(souvlaki::MediaMetadata {
                title: Some(&m.title),
                artist: (!m.artist.is_empty()).then_some(m.artist.as_str()),
                cover_url: m.artwork.as_deref(),
                ..Default::default()
            }),
            None => self.controls.set_metadata(souvlaki::MediaMetadata::default()),
        };

        if let Err(e) = result {
            log::warn!("Media session metadata update failed: {:?}", e);
        }
    }

    fn set_playback(&mut self, playing: bool) {
        let playback = if playing {
            MediaPlayback::Playing { progress: None }
        } else {
            MediaPlayback::Paused { progress: None }
        };

        if let Err(e) = self.controls.set_playback(playback) {
            log::warn!("Media session playback update failed: {:?}", e);
        }
    }
}
