use crate::application::handlers::HandlerContext;
use crate::application::handlers::media_handler::MediaHandler;
use crate::application::handlers::playback_handler::PlaybackHandler;
use crate::application::handlers::ui_handler::UiHandler;
use crate::application::state::AppState;
use crate::config::AppConfig;
use crate::core::events::*;
use crate::core::models::TrackDescriptor;
use crate::core::traits::*;
use crate::modules::input::media_session::MediaSessionBridge;
use crate::modules::input::voice::VoiceControl;
use crate::modules::library::favorites::Favorites;
use crate::modules::library::recently::RecentlyPlayed;
use crate::modules::navigation::resolver::NavigationResolver;
use crate::modules::playback::silent_surface::SilentSurface;
use crate::modules::storage::preferences::Preferences;
use crate::modules::ui::toast::ToastQueue;
use anyhow::Result;
use crossbeam_channel::bounded;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

/// Main application orchestrator
pub struct Application {
    state: AppState,
    event_tx: EventSender,
    event_rx: EventReceiver,

    navigation: NavigationResolver,
    preferences: Preferences,
    volume_step: f32,

    // Module references
    surface: Box<dyn PlayerSurface>,
    voice: VoiceControl,
    media: MediaSessionBridge,
    ui_renderer: Option<Box<dyn UiRenderer>>,

    // Set once TrackEnded has been sent for the loaded track
    end_reported: bool,

    // Keep track of running state
    running: bool,
}

impl Application {
    /// Build the player over a fixed track list, restoring shuffle, repeat,
    /// dark mode, favorites and history from `preferences`.
    pub fn new(tracks: Vec<TrackDescriptor>, mut preferences: Preferences) -> Self {
        let (tx, rx) = bounded(100);

        preferences.discard_malformed();

        let shuffle = preferences.shuffle();
        let repeat = preferences.repeat_mode();

        let mut state = AppState::default();
        state.dark = preferences.dark();
        state.favorites = Favorites::new(preferences.favorites());
        state.recent = RecentlyPlayed::with_history(state.recent.capacity(), preferences.recently_played());
        state.playback.shuffle = shuffle;
        state.playback.repeat = repeat;
        if !tracks.is_empty() {
            state.ui.selected_index = Some(0);
        }

        Self {
            state,
            event_tx: tx,
            event_rx: rx,
            navigation: NavigationResolver::new(tracks).with_preferences(shuffle, repeat),
            preferences,
            volume_step: AppConfig::default().volume_step,
            surface: Box::new(SilentSurface::new()),
            voice: VoiceControl::unsupported(),
            media: MediaSessionBridge::inert(),
            ui_renderer: None,
            end_reported: false,
            running: false,
        }
    }

    /// Apply timing and capacity settings
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.navigation = self.navigation.with_retry_delay(config.retry_delay());
        self.volume_step = config.volume_step;
        self.state.toasts = ToastQueue::new(config.toast_duration());
        self.state.recent = RecentlyPlayed::with_history(
            config.recent_capacity,
            self.preferences.recently_played(),
        );
        self
    }

    /// Set the player surface
    pub fn with_surface(mut self, surface: Box<dyn PlayerSurface>) -> Self {
        self.surface = surface;
        self
    }

    /// Set the voice session
    pub fn with_voice(mut self, voice: VoiceControl) -> Self {
        self.voice = voice;
        self
    }

    /// Set the media-session bridge
    pub fn with_media_session(mut self, media: MediaSessionBridge) -> Self {
        self.media = media;
        self
    }

    /// Set the UI renderer
    pub fn with_ui_renderer(mut self, renderer: Box<dyn UiRenderer>) -> Self {
        self.ui_renderer = Some(renderer);
        self
    }

    /// Reproducible shuffles
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.navigation = self.navigation.with_seed(seed);
        self
    }

    /// Get event sender (for modules to emit events)
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn navigation(&self) -> &NavigationResolver {
        &self.navigation
    }

    pub fn surface(&self) -> &dyn PlayerSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn PlayerSurface {
        self.surface.as_mut()
    }

    /// Initialize the application
    pub fn init(&mut self) -> Result<()> {
        self.state.playback.volume = self.surface.volume();
        self.state.ui.voice_supported = self.voice.is_supported();

        // Initialize UI
        if let Some(ui) = &mut self.ui_renderer {
            ui.init()?;
        }

        log::info!(
            "Ready with {} tracks (shuffle {}, repeat {})",
            self.navigation.len(),
            self.navigation.is_shuffle_enabled(),
            self.navigation.repeat_mode()
        );

        Ok(())
    }

    /// Run the main event loop
    pub fn run(&mut self) -> Result<()> {
        self.running = true;

        while self.running {
            // Process all pending events
            self.process_events()?;

            // Poll UI for input
            if let Some(ui) = &mut self.ui_renderer {
                let ui_events = ui.poll_input()?;
                for event in ui_events {
                    self.event_tx.send(AppEvent::Ui(event))?;
                }
            }

            self.tick(Instant::now())?;

            // Render UI with current state
            if let Some(ui) = &mut self.ui_renderer {
                ui.render(&self.state, &self.navigation)?;
            }

            // Small sleep to prevent CPU spinning
            std::thread::sleep(FRAME);
        }

        Ok(())
    }

    /// Time-driven work: the deferred play retry, end-of-track detection,
    /// toast expiry and the elapsed clock.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.navigation.poll_deferred(now, self.surface.as_mut());

        if self.surface.has_finished() {
            if !self.end_reported {
                self.end_reported = true;
                self.event_tx
                    .send(AppEvent::Playback(PlaybackEvent::TrackEnded))?;
            }
        } else {
            self.end_reported = false;
        }

        self.state.toasts.prune(now);
        self.state.playback.elapsed = self.surface.position();
        Ok(())
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        // Drain all events currently in queue
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    /// Process events once without entering the main loop (useful for one-off commands)
    pub fn run_once(&mut self) -> Result<()> {
        self.process_events()?;
        Ok(())
    }

    /// Handle a single event
    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        // Update state based on event
        self.state.apply_event(&event);

        let mut ctx = HandlerContext {
            state: &mut self.state,
            event_tx: &self.event_tx,
            surface: self.surface.as_mut(),
            navigation: &mut self.navigation,
            preferences: &mut self.preferences,
            voice: &mut self.voice,
            media: &mut self.media,
            volume_step: self.volume_step,
        };

        // Route event to appropriate handler
        match &event {
            AppEvent::Playback(pe) => PlaybackHandler.handle(pe, &mut ctx)?,
            AppEvent::Ui(ue) => UiHandler.handle(ue, &mut ctx)?,
            AppEvent::Media(action) => MediaHandler.handle(*action, &mut ctx)?,
            AppEvent::Shutdown => {
                self.running = false;
            }
        }

        Ok(())
    }

    /// Cleanup resources
    pub fn cleanup(&mut self) -> Result<()> {
        self.media.reflect_playback(false);
        self.media.reflect_track(None);

        // Cleanup UI
        if let Some(ui) = &mut self.ui_renderer {
            ui.cleanup()?;
        }

        Ok(())
    }
}
