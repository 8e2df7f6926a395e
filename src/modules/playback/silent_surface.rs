use crate::core::models::TrackDescriptor;
use crate::core::traits::PlayerSurface;
use anyhow::Result;

/// A call made against a [`SilentSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Select(String),
    Play,
    Pause,
    Restart,
}

/// Player surface without audio output.
///
/// Used when no output device can be opened, and by tests to observe what
/// the navigation layer asked for.
#[derive(Debug, Clone)]
pub struct SilentSurface {
    loaded: Option<String>,
    paused: bool,
    finished: bool,
    volume: f32,
    /// When set, `select_track` loads the track but leaves it paused
    stall_on_select: bool,
    calls: Vec<SurfaceCall>,
}

impl SilentSurface {
    pub fn new() -> Self {
        Self {
            loaded: None,
            paused: true,
            finished: false,
            volume: 1.0,
            stall_on_select: false,
            calls: Vec::new(),
        }
    }

    /// Selections load the track without starting it.
    pub fn stalling(mut self) -> Self {
        self.stall_on_select = true;
        self
    }

    /// Load a resource as if the host started it on its own.
    pub fn load(&mut self, source: &str) {
        self.loaded = Some(source.to_string());
        self.paused = false;
        self.finished = false;
    }

    /// Mark the loaded track as played to the end.
    pub fn finish(&mut self) {
        self.finished = true;
        self.paused = true;
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }
}

impl Default for SilentSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerSurface for SilentSurface {
    fn select_track(&mut self, track: &TrackDescriptor) -> Result<()> {
        self.calls.push(SurfaceCall::Select(track.source.clone()));
        self.loaded = Some(track.source.clone());
        self.paused = self.stall_on_select;
        self.finished = false;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(SurfaceCall::Play);
        if self.loaded.is_some() {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.calls.push(SurfaceCall::Pause);
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn restart(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::Restart);
        self.finished = false;
        if self.loaded.is_some() {
            self.paused = false;
        }
        Ok(())
    }

    fn active_source(&self) -> Option<String> {
        self.loaded.clone()
    }

    fn has_finished(&self) -> bool {
        self.finished
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}
