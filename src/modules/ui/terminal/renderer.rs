use crate::application::state::AppState;
use crate::core::events::UiEvent;
use crate::core::models::{TrackDescriptor, TrackId};
use crate::core::traits::UiRenderer;
use crate::modules::input::shortcuts::{InputFocus, dispatch_shortcut};
use crate::modules::navigation::resolver::NavigationResolver;
use crate::utils::{format_elapsed, volume_percent};
use anyhow::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
};
use std::io::{Write, stdout};
use std::time::Duration;

/// Single status line renderer for plain terminals and one-shot commands.
pub struct TerminalRenderer {
    initialized: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    pub fn print_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn print_tracks(&self, tracks: &[TrackDescriptor]) {
        let total = tracks.len();
        for track in tracks {
            println!("[{}/{}] {}", track.position + 1, total, track);
        }
    }

    /// Print stored ids, naming the track where it is still in the library.
    pub fn print_ids<'a>(
        &self,
        heading: &str,
        ids: impl IntoIterator<Item = &'a TrackId>,
        navigation: &NavigationResolver,
    ) {
        let lines: Vec<String> = ids
            .into_iter()
            .map(|id| match navigation.position_of(id).and_then(|i| navigation.track(i)) {
                Some(track) => track.to_string(),
                None => format!("{} (not in library)", id),
            })
            .collect();

        if lines.is_empty() {
            println!("{}: none", heading);
            return;
        }
        println!("{}:", heading);
        for (i, line) in lines.iter().enumerate() {
            println!("  {}. {}", i + 1, line);
        }
    }

    fn map_key(key: &KeyEvent) -> Option<UiEvent> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiEvent::QuitRequested)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UiEvent::QuitRequested),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(UiEvent::NextTrackRequested),
            KeyCode::Char('b') | KeyCode::Char('B') => Some(UiEvent::PreviousTrackRequested),
            _ => dispatch_shortcut(key, InputFocus::Browse).map(|action| action.into_event()),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summary of what is playing and the ordering flags.
pub fn status_line(state: &AppState, navigation: &NavigationResolver) -> String {
    let now = match state.playback.now_playing.and_then(|i| navigation.track(i)) {
        Some(track) => {
            let marker = if state.playback.is_paused { "⏸" } else { "▶" };
            format!(
                "{} {} [{}]",
                marker,
                track,
                format_elapsed(state.playback.elapsed)
            )
        }
        None => "No song playing".to_string(),
    };

    format!(
        "{} | Shuffle: {} | Repeat: {} | Vol: {}%",
        now,
        if state.playback.shuffle { "On" } else { "Off" },
        state.playback.repeat.label(),
        volume_percent(state.playback.volume)
    )
}

impl UiRenderer for TerminalRenderer {
    fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.initialized {
            terminal::disable_raw_mode()?;
            self.initialized = false;
            println!();
        }
        Ok(())
    }

    fn render(&mut self, state: &AppState, navigation: &NavigationResolver) -> Result<()> {
        let mut stdout = stdout();

        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::CurrentLine))?;

        print!("{}", status_line(state, navigation));

        if let Some(toast) = state.toasts.visible().last() {
            print!(" | {}", toast);
        }

        print!(" | [Space: Pause | N: Next | B: Prev | S: Shuffle | R: Repeat | Q: Quit]");

        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    events.extend(Self::map_key(&key));
                }
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RepeatMode;

    fn navigation() -> NavigationResolver {
        NavigationResolver::new(vec![
            TrackDescriptor::new(0, "Intro", "Band", "0.mp3"),
            TrackDescriptor::new(1, "Outro", "Band", "1.mp3"),
        ])
    }

    #[test]
    fn status_line_without_playback() {
        let state = AppState::default();
        assert_eq!(
            status_line(&state, &navigation()),
            "No song playing | Shuffle: Off | Repeat: Off | Vol: 100%"
        );
    }

    #[test]
    fn status_line_shows_current_track_and_flags() {
        let mut state = AppState::default();
        state.playback.now_playing = Some(1);
        state.playback.is_paused = false;
        state.playback.shuffle = true;
        state.playback.repeat = RepeatMode::One;
        state.playback.volume = 0.5;

        let line = status_line(&state, &navigation());
        assert!(line.starts_with("▶ "));
        assert!(line.contains("Outro"));
        assert!(line.ends_with("Shuffle: On | Repeat: One | Vol: 50%"));
    }

    #[test]
    fn keys_map_to_requests() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            TerminalRenderer::map_key(&key(KeyCode::Char('n'))),
            Some(UiEvent::NextTrackRequested)
        );
        assert_eq!(
            TerminalRenderer::map_key(&key(KeyCode::Char('r'))),
            Some(UiEvent::RepeatCycleRequested)
        );
        assert_eq!(TerminalRenderer::map_key(&key(KeyCode::Char('z'))), None);
    }
}
