use crate::core::models::TrackDescriptor;
use crate::core::traits::PlayerSurface;
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::fs::File;
use std::time::{Duration, Instant};

/// Host player surface backed by the default audio output.
pub struct RodioSurface {
    // Dropping the stream silences the sink, so it lives as long as we do.
    stream: OutputStream,
    sink: Sink,
    loaded: Option<String>,
    is_paused: bool,

    // Track playback position
    playback_start: Option<Instant>,
    pause_elapsed: Duration,
}

impl RodioSurface {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::from_default_device()
            .context("failed to open default audio output")?
            .with_error_callback(|e| log::warn!("Audio stream error: {}", e))
            .open_stream_or_fallback()
            .context("failed to start audio output stream")?;
        stream.log_on_drop(false);

        let sink = Sink::connect_new(stream.mixer());

        Ok(Self {
            stream,
            sink,
            loaded: None,
            is_paused: true,
            playback_start: None,
            pause_elapsed: Duration::ZERO,
        })
    }

    fn load(&mut self, source: &str) -> Result<()> {
        let volume = self.sink.volume();
        self.sink.stop();
        self.sink = Sink::connect_new(self.stream.mixer());
        self.sink.set_volume(volume);

        let file = File::open(source).with_context(|| format!("failed to open {}", source))?;
        let decoded = Decoder::try_from(file)
            .with_context(|| format!("failed to decode audio file: {}", source))?;

        self.sink.append(decoded);
        self.loaded = Some(source.to_string());
        self.is_paused = false;

        // Reset position tracking
        self.playback_start = Some(Instant::now());
        self.pause_elapsed = Duration::ZERO;

        self.sink.play();
        Ok(())
    }
}

impl PlayerSurface for RodioSurface {
    fn select_track(&mut self, track: &TrackDescriptor) -> Result<()> {
        log::info!("Playing {}", track.id);
        self.load(&track.source)
    }

    fn play(&mut self) {
        if self.loaded.is_some() && self.is_paused {
            self.sink.play();
            self.is_paused = false;
            self.playback_start = Some(Instant::now()); // Resume time tracking
        }
    }

    fn pause(&mut self) {
        if self.loaded.is_some() && !self.is_paused {
            // Capture current position before pausing
            if let Some(start) = self.playback_start {
                self.pause_elapsed += start.elapsed();
            }

            self.sink.pause();
            self.is_paused = true;
            self.playback_start = None; // Stop tracking time while paused
        }
    }

    fn is_paused(&self) -> bool {
        self.loaded.is_none() || self.is_paused
    }

    fn restart(&mut self) -> Result<()> {
        let Some(source) = self.loaded.clone() else {
            return Ok(());
        };
        self.load(&source)
    }

    fn active_source(&self) -> Option<String> {
        self.loaded.clone()
    }

    fn has_finished(&self) -> bool {
        self.loaded.is_some() && !self.is_paused && self.sink.empty()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn position(&self) -> Duration {
        match self.playback_start {
            Some(start) if !self.is_paused => self.pause_elapsed + start.elapsed(),
            _ => self.pause_elapsed,
        }
    }
}

// To avoid leaks
impl Drop for RodioSurface {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
