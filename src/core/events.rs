use crate::core::models::{RepeatMode, TrackId};

/// All events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // Playback events
    Playback(PlaybackEvent),

    // UI events (keyboard, panels, voice transcripts)
    Ui(UiEvent),

    // OS media-session actions
    Media(MediaAction),

    // Application lifecycle
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A track began playing, whoever started it
    TrackStarted { index: usize },

    /// The loaded track played to its end
    TrackEnded,

    /// Playback paused
    Paused,

    /// Playback resumed
    Resumed,

    /// Volume changed (0.0 - 1.0)
    VolumeChanged { volume: f32 },

    /// Shuffle enabled or disabled
    ShuffleChanged { enabled: bool },

    /// Repeat mode changed
    RepeatChanged { mode: RepeatMode },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// User moved the list cursor
    SelectionChanged { index: usize },

    /// User picked a track directly (manual pick)
    TrackPicked { index: usize },

    /// User requested next track
    NextTrackRequested,

    /// User requested previous track
    PreviousTrackRequested,

    /// User requested pause/resume toggle
    TogglePauseRequested,

    /// Explicit pause (voice, media keys)
    PauseRequested,

    /// Explicit resume (voice, media keys)
    ResumeRequested,

    /// Volume step, positive or negative
    VolumeStepRequested { delta: f32 },

    /// Flip shuffle
    ShuffleToggleRequested,

    /// Set shuffle state explicitly (not toggle)
    ShuffleSet { enabled: bool },

    /// Advance repeat mode none -> all -> one
    RepeatCycleRequested,

    /// Flip dark mode
    DarkToggleRequested,

    /// Set dark mode explicitly
    DarkSet { enabled: bool },

    /// Toggle favorite on the track at this position
    FavoriteToggleRequested { index: usize },

    /// Toggle favorite on whatever is current
    LikeCurrentRequested,

    /// Open or close the liked songs panel
    LikedPanelToggled,

    /// Play an entry from the liked songs panel
    FavoritePicked { id: TrackId },

    /// Open or close the recently played drawer
    RecentDrawerToggled,

    /// Play an entry from the recently played drawer
    RecentPicked { id: TrackId },

    /// Start or stop listening for voice commands
    VoiceToggleRequested,

    /// A recognized phrase
    VoiceTranscript { text: String },

    /// Show a toast
    Toast { message: String, emoji: String },

    /// User requested quit
    QuitRequested,
}

/// OS-level media key or remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Play,
    Pause,
    Toggle,
    Previous,
    Next,
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
