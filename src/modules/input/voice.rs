use crate::core::events::UiEvent;
use crate::core::models::{Capability, TrackDescriptor};
use crate::core::traits::SpeechRecognizer;
use anyhow::Result;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

pub const DEFAULT_VOICE_LANGUAGE: &str = "en-IN";

/// Something a spoken phrase asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    Next,
    Previous,
    Pause,
    Resume,
    PlayTrack(usize),
    VolumeUp,
    VolumeDown,
    ShuffleOn,
    ShuffleOff,
    DarkOn,
    DarkOff,
    LikeCurrent,
}

impl VoiceCommand {
    pub fn into_event(self, volume_step: f32) -> UiEvent {
        match self {
            VoiceCommand::Next => UiEvent::NextTrackRequested,
            VoiceCommand::Previous => UiEvent::PreviousTrackRequested,
            VoiceCommand::Pause => UiEvent::PauseRequested,
            VoiceCommand::Resume => UiEvent::ResumeRequested,
            VoiceCommand::PlayTrack(index) => UiEvent::TrackPicked { index },
            VoiceCommand::VolumeUp => UiEvent::VolumeStepRequested { delta: volume_step },
            VoiceCommand::VolumeDown => UiEvent::VolumeStepRequested { delta: -volume_step },
            VoiceCommand::ShuffleOn => UiEvent::ShuffleSet { enabled: true },
            VoiceCommand::ShuffleOff => UiEvent::ShuffleSet { enabled: false },
            VoiceCommand::DarkOn => UiEvent::DarkSet { enabled: true },
            VoiceCommand::DarkOff => UiEvent::DarkSet { enabled: false },
            VoiceCommand::LikeCurrent => UiEvent::LikeCurrentRequested,
        }
    }

    /// Commands that change a persisted setting rather than playback.
    pub fn is_setting(self) -> bool {
        matches!(
            self,
            VoiceCommand::ShuffleOn
                | VoiceCommand::ShuffleOff
                | VoiceCommand::DarkOn
                | VoiceCommand::DarkOff
        )
    }

    pub fn describe(self, tracks: &[TrackDescriptor]) -> String {
        match self {
            VoiceCommand::Next => "next track".to_string(),
            VoiceCommand::Previous => "previous track".to_string(),
            VoiceCommand::Pause => "pause".to_string(),
            VoiceCommand::Resume => "resume".to_string(),
            VoiceCommand::PlayTrack(index) => match tracks.get(index) {
                Some(track) => format!("play [{}] {}", index + 1, track),
                None => format!("play [{}]", index + 1),
            },
            VoiceCommand::VolumeUp => "volume up".to_string(),
            VoiceCommand::VolumeDown => "volume down".to_string(),
            VoiceCommand::ShuffleOn => "shuffle on".to_string(),
            VoiceCommand::ShuffleOff => "shuffle off".to_string(),
            VoiceCommand::DarkOn => "dark mode on".to_string(),
            VoiceCommand::DarkOff => "dark mode off".to_string(),
            VoiceCommand::LikeCurrent => "like current track".to_string(),
        }
    }
}

/// Interpret a transcript. Rules are tried in a fixed order and the first hit
/// wins, so "play next" is a skip and not a search for a track named "next".
pub fn parse_voice_command(text: &str, tracks: &[TrackDescriptor]) -> Option<VoiceCommand> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let has = |needle: &str| text.contains(needle);

    if has("play next") || has("next song") || has("skip") {
        return Some(VoiceCommand::Next);
    }
    if has("previous") || has("last song") || has("go back") {
        return Some(VoiceCommand::Previous);
    }
    if has("pause") || has("stop") {
        return Some(VoiceCommand::Pause);
    }
    if has("play") && (has("play ") || text == "play") {
        if text == "play" {
            return Some(VoiceCommand::Resume);
        }
        if let Some(index) = text.find("play ").and_then(|at| match_track(&text[at + 5..], tracks)) {
            return Some(VoiceCommand::PlayTrack(index));
        }
    }
    if text == "resume" {
        return Some(VoiceCommand::Resume);
    }
    if has("volume up") || has("increase volume") {
        return Some(VoiceCommand::VolumeUp);
    }
    if has("volume down") || has("decrease volume") || has("lower volume") {
        return Some(VoiceCommand::VolumeDown);
    }
    if has("shuffle on") || has("enable shuffle") || (has("shuffle") && has("on")) {
        return Some(VoiceCommand::ShuffleOn);
    }
    if has("shuffle off") || has("disable shuffle") || (has("shuffle") && has("off")) {
        return Some(VoiceCommand::ShuffleOff);
    }
    if has("dark") {
        return Some(VoiceCommand::DarkOn);
    }
    if has("light") {
        return Some(VoiceCommand::DarkOff);
    }
    if has("like") || has("favorite") || has("save this") {
        return Some(VoiceCommand::LikeCurrent);
    }

    None
}

/// Title hits score 2 and artist hits 1; the first track with the best
/// positive score wins. Without any substring hit, fall back to fuzzy
/// matching over "title artist".
fn match_track(query: &str, tracks: &[TrackDescriptor]) -> Option<usize> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut best = None;
    let mut best_score = 0;
    for (index, track) in tracks.iter().enumerate() {
        let title_hit = track.title.to_lowercase().contains(query);
        let artist_hit = track.artist.to_lowercase().contains(query);
        let score = 2 * u8::from(title_hit) + u8::from(artist_hit);
        if score > best_score {
            best = Some(index);
            best_score = score;
        }
    }

    best.or_else(|| {
        let matcher = SkimMatcherV2::default();
        tracks
            .iter()
            .enumerate()
            .filter_map(|(index, track)| {
                matcher
                    .fuzzy_match(&track.search_key(), query)
                    .map(|score| (index, score))
            })
            // max_by_key keeps the last of equal scores; reverse to keep the first
            .rev()
            .max_by_key(|&(_, score)| score)
            .map(|(index, _)| index)
    })
}

/// Outcome of [`VoiceControl::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceToggle {
    Listening,
    Stopped,
    Unsupported,
}

/// A single-shot listening session over an optional recognizer.
pub struct VoiceControl {
    recognizer: Capability<Box<dyn SpeechRecognizer>>,
    language: String,
    listening: bool,
    status: String,
}

impl VoiceControl {
    pub fn new(recognizer: Capability<Box<dyn SpeechRecognizer>>, language: &str) -> Self {
        Self {
            recognizer,
            language: language.to_string(),
            listening: false,
            status: String::new(),
        }
    }

    pub fn unsupported() -> Self {
        Self::new(Capability::Absent, DEFAULT_VOICE_LANGUAGE)
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_present()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn toggle(&mut self) -> VoiceToggle {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return VoiceToggle::Unsupported;
        };

        if self.listening {
            recognizer.stop();
            self.listening = false;
            self.status.clear();
            return VoiceToggle::Stopped;
        }

        match recognizer.start(&self.language) {
            Ok(()) => {
                self.listening = true;
                VoiceToggle::Listening
            }
            Err(e) => {
                log::warn!("Could not start speech recognition: {:#}", e);
                VoiceToggle::Stopped
            }
        }
    }

    /// Record a transcript and end the session. Returns the normalised text.
    pub fn hear(&mut self, transcript: &str) -> String {
        let text = transcript.trim().to_lowercase();
        self.status = format!("Heard: {}", text);
        if self.listening {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
            self.listening = false;
        }
        text
    }
}

/// Recognizer fed by a typed prompt instead of a microphone.
#[derive(Debug, Default)]
pub struct PromptRecognizer {
    language: Option<String>,
}

impl PromptRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl SpeechRecognizer for PromptRecognizer {
    fn start(&mut self, language: &str) -> Result<()> {
        log::debug!("Listening for typed commands ({})", language);
        self.language = Some(language.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.language = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Vec<TrackDescriptor> {
        vec![
            TrackDescriptor::new(0, "Hello", "Adele", "hello.mp3"),
            TrackDescriptor::new(1, "Someone Like You", "Adele", "someone.mp3"),
            TrackDescriptor::new(2, "Yellow", "Coldplay", "yellow.mp3"),
            TrackDescriptor::new(3, "Fix You", "Coldplay", "fix.mp3"),
        ]
    }

    // ── Rule order ────────────────────────────────────────────────────────────

    #[test]
    fn play_next_is_a_skip_not_a_search() {
        assert_eq!(parse_voice_command("Play next", &library()), Some(VoiceCommand::Next));
        assert_eq!(parse_voice_command("skip this", &library()), Some(VoiceCommand::Next));
    }

    #[test]
    fn navigation_and_pause_phrases() {
        let tracks = library();
        assert_eq!(parse_voice_command("go back", &tracks), Some(VoiceCommand::Previous));
        assert_eq!(parse_voice_command("last song", &tracks), Some(VoiceCommand::Previous));
        assert_eq!(parse_voice_command("stop the music", &tracks), Some(VoiceCommand::Pause));
        assert_eq!(parse_voice_command("  PLAY ", &tracks), Some(VoiceCommand::Resume));
        assert_eq!(parse_voice_command("resume", &tracks), Some(VoiceCommand::Resume));
    }

    #[test]
    fn empty_transcript_is_ignored() {
        assert_eq!(parse_voice_command("   ", &library()), None);
        assert_eq!(parse_voice_command("what time is it", &library()), None);
    }

    // ── Track matching ────────────────────────────────────────────────────────

    #[test]
    fn title_hit_beats_artist_hit() {
        // "yellow" is a title; "hello" only matches title 0
        assert_eq!(
            parse_voice_command("play yellow", &library()),
            Some(VoiceCommand::PlayTrack(2))
        );
        assert_eq!(
            parse_voice_command("play hello", &library()),
            Some(VoiceCommand::PlayTrack(0))
        );
    }

    #[test]
    fn artist_only_match_picks_first_track() {
        assert_eq!(
            parse_voice_command("play coldplay", &library()),
            Some(VoiceCommand::PlayTrack(2))
        );
    }

    #[test]
    fn fuzzy_fallback_when_no_substring_hits() {
        assert_eq!(
            parse_voice_command("play fx you", &library()),
            Some(VoiceCommand::PlayTrack(3))
        );
    }

    #[test]
    fn unmatched_play_falls_through_to_later_rules() {
        let tracks = vec![TrackDescriptor::new(0, "Intro", "", "intro.mp3")];
        assert_eq!(
            parse_voice_command("play in dark mode", &tracks),
            Some(VoiceCommand::DarkOn)
        );
    }

    // ── Toggles ───────────────────────────────────────────────────────────────

    #[test]
    fn volume_shuffle_dark_like() {
        let tracks = library();
        assert_eq!(parse_voice_command("volume up", &tracks), Some(VoiceCommand::VolumeUp));
        assert_eq!(parse_voice_command("lower volume", &tracks), Some(VoiceCommand::VolumeDown));
        assert_eq!(parse_voice_command("turn shuffle on", &tracks), Some(VoiceCommand::ShuffleOn));
        assert_eq!(parse_voice_command("disable shuffle", &tracks), Some(VoiceCommand::ShuffleOff));
        assert_eq!(parse_voice_command("dark mode", &tracks), Some(VoiceCommand::DarkOn));
        assert_eq!(parse_voice_command("light mode", &tracks), Some(VoiceCommand::DarkOff));
        assert_eq!(parse_voice_command("save this", &tracks), Some(VoiceCommand::LikeCurrent));
    }

    #[test]
    fn volume_commands_carry_the_step() {
        assert_eq!(
            VoiceCommand::VolumeDown.into_event(0.1),
            UiEvent::VolumeStepRequested { delta: -0.1 }
        );
        assert_eq!(
            VoiceCommand::PlayTrack(4).into_event(0.1),
            UiEvent::TrackPicked { index: 4 }
        );
    }

    #[test]
    fn only_shuffle_and_dark_are_settings() {
        assert!(VoiceCommand::ShuffleOff.is_setting());
        assert!(VoiceCommand::DarkOn.is_setting());
        assert!(!VoiceCommand::PlayTrack(0).is_setting());
        assert!(!VoiceCommand::LikeCurrent.is_setting());
        assert!(!VoiceCommand::VolumeUp.is_setting());
    }

    // ── Session ───────────────────────────────────────────────────────────────

    #[test]
    fn toggle_without_recognizer_is_unsupported() {
        let mut voice = VoiceControl::unsupported();
        assert_eq!(voice.toggle(), VoiceToggle::Unsupported);
        assert!(!voice.is_listening());
    }

    #[test]
    fn session_ends_after_one_transcript() {
        let recognizer: Box<dyn SpeechRecognizer> = Box::new(PromptRecognizer::new());
        let mut voice = VoiceControl::new(Capability::Present(recognizer), "en-IN");

        assert_eq!(voice.toggle(), VoiceToggle::Listening);
        assert!(voice.is_listening());

        let text = voice.hear("  Next Song ");
        assert_eq!(text, "next song");
        assert_eq!(voice.status(), "Heard: next song");
        assert!(!voice.is_listening());
    }

    #[test]
    fn toggling_twice_stops_and_clears_status() {
        let recognizer: Box<dyn SpeechRecognizer> = Box::new(PromptRecognizer::new());
        let mut voice = VoiceControl::new(Capability::Present(recognizer), "en-IN");
        voice.toggle();
        assert_eq!(voice.toggle(), VoiceToggle::Stopped);
        assert_eq!(voice.status(), "");
    }
}
