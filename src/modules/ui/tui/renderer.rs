use crate::application::state::AppState;
use crate::core::events::UiEvent;
use crate::core::models::TrackId;
use crate::core::traits::UiRenderer;
use crate::modules::input::shortcuts::{InputFocus, dispatch_shortcut};
use crate::modules::navigation::resolver::NavigationResolver;
use crate::modules::ui::theme::Theme;
use crate::utils::{APP_NAME, format_elapsed, volume_percent};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::io::{Stdout, stdout};
use std::time::Duration;

/// Which text prompt is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    /// `:` command line
    Command,
    /// Typed stand-in for a microphone while voice is listening
    Voice,
}

pub struct TuiRenderer {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    list_state: ListState,
    panel_state: ListState,

    volume_step: f32,

    // Display state (synced from AppState on render)
    track_count: usize,
    liked: Vec<TrackId>,
    recent: Vec<TrackId>,
    liked_open: bool,
    recent_open: bool,
    voice_listening: bool,

    // Prompt state (UI-only)
    prompt: Option<Prompt>,
    input: String,
}

impl TuiRenderer {
    pub fn new(volume_step: f32) -> Self {
        Self {
            terminal: None,
            list_state: ListState::default(),
            panel_state: ListState::default(),
            volume_step,
            track_count: 0,
            liked: Vec::new(),
            recent: Vec::new(),
            liked_open: false,
            recent_open: false,
            voice_listening: false,
            prompt: None,
            input: String::new(),
        }
    }

    fn sync(&mut self, state: &AppState, navigation: &NavigationResolver) {
        self.track_count = navigation.len();
        self.liked = state.favorites.iter().cloned().collect();
        self.recent = state.recent.iter().cloned().collect();

        let panel_opened = (state.ui.liked_panel_open && !self.liked_open)
            || (state.ui.recent_drawer_open && !self.recent_open);
        if panel_opened {
            self.panel_state.select(Some(0));
        }
        self.liked_open = state.ui.liked_panel_open;
        self.recent_open = state.ui.recent_drawer_open;

        if state.ui.voice_listening && !self.voice_listening {
            self.prompt = Some(Prompt::Voice);
            self.input.clear();
        } else if !state.ui.voice_listening && self.prompt == Some(Prompt::Voice) {
            self.prompt = None;
        }
        self.voice_listening = state.ui.voice_listening;

        self.list_state.select(state.ui.selected_index);
    }

    fn draw_ui(f: &mut Frame, state: &AppState, navigation: &NavigationResolver, view: &mut ViewState) {
        let theme = Theme::from_dark(state.dark);
        f.render_widget(
            Block::default().style(Style::default().bg(theme.background).fg(theme.foreground)),
            f.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main content
                Constraint::Length(4), // Now playing
                Constraint::Length(3), // Controls or prompt
            ])
            .split(f.area());

        draw_header(f, chunks[0], state, &theme);

        if state.ui.recent_drawer_open {
            let main = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(chunks[1]);
            draw_track_list(f, main[0], state, navigation, &theme, view.list_state);
            draw_recent_drawer(f, main[1], state, navigation, &theme, view.panel_state);
        } else {
            draw_track_list(f, chunks[1], state, navigation, &theme, view.list_state);
        }

        draw_now_playing(f, chunks[2], state, navigation, &theme);

        match view.prompt {
            Some(prompt) => draw_prompt(f, chunks[3], prompt, view.input, &theme),
            None => draw_controls(f, chunks[3], state, &theme),
        }

        if state.ui.liked_panel_open {
            draw_liked_panel(f, state, navigation, &theme, view.panel_state);
        }

        draw_toasts(f, state, &theme);
    }

    fn move_cursor(&mut self, down: bool) -> Option<usize> {
        if self.track_count == 0 {
            return None;
        }

        let last = self.track_count - 1;
        let new_idx = match self.list_state.selected() {
            Some(i) if down => if i >= last { 0 } else { i + 1 },
            Some(i) => if i == 0 { last } else { i - 1 },
            None => 0,
        };
        self.list_state.select(Some(new_idx));
        Some(new_idx)
    }

    fn move_panel(&mut self, len: usize, down: bool) {
        if len == 0 {
            return;
        }
        let new_idx = match self.panel_state.selected() {
            Some(i) if down => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.panel_state.select(Some(new_idx));
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, prompt: Prompt, events: &mut Vec<UiEvent>) {
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                self.prompt = None;
                if !text.trim().is_empty() {
                    events.push(UiEvent::VoiceTranscript { text });
                } else if prompt == Prompt::Voice {
                    events.push(UiEvent::VoiceToggleRequested);
                }
            }
            KeyCode::Esc => {
                self.input.clear();
                self.prompt = None;
                if prompt == Prompt::Voice {
                    events.push(UiEvent::VoiceToggleRequested);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Keys while the liked panel or recent drawer has the cursor.
    /// Returns true when the key was consumed.
    fn handle_panel_key(&mut self, key: KeyEvent, events: &mut Vec<UiEvent>) -> bool {
        let (entries, close_event) = if self.liked_open {
            (self.liked.clone(), UiEvent::LikedPanelToggled)
        } else if self.recent_open {
            (self.recent.clone(), UiEvent::RecentDrawerToggled)
        } else {
            return false;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_panel(entries.len(), false),
            KeyCode::Down | KeyCode::Char('j') => self.move_panel(entries.len(), true),
            KeyCode::Enter => {
                let picked = self.panel_state.selected().and_then(|i| entries.get(i)).cloned();
                if let Some(id) = picked {
                    events.push(if self.liked_open {
                        UiEvent::FavoritePicked { id }
                    } else {
                        UiEvent::RecentPicked { id }
                    });
                }
            }
            KeyCode::Esc => events.push(close_event),
            KeyCode::Char('f') if self.liked_open => events.push(close_event),
            KeyCode::Char('h') if self.recent_open => events.push(close_event),
            _ => return false,
        }
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent, events: &mut Vec<UiEvent>) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                events.push(UiEvent::QuitRequested);
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                events.push(UiEvent::QuitRequested);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(index) = self.move_cursor(false) {
                    events.push(UiEvent::SelectionChanged { index });
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(index) = self.move_cursor(true) {
                    events.push(UiEvent::SelectionChanged { index });
                }
            }
            KeyCode::Enter => {
                if let Some(index) = self.list_state.selected() {
                    events.push(UiEvent::TrackPicked { index });
                }
            }
            KeyCode::Char('*') => {
                if let Some(index) = self.list_state.selected() {
                    events.push(UiEvent::FavoriteToggleRequested { index });
                }
            }
            KeyCode::Char('f') => events.push(UiEvent::LikedPanelToggled),
            KeyCode::Char('h') => events.push(UiEvent::RecentDrawerToggled),
            KeyCode::Char('v') => events.push(UiEvent::VoiceToggleRequested),
            KeyCode::Char(':') => {
                self.prompt = Some(Prompt::Command);
                self.input.clear();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                events.push(UiEvent::VolumeStepRequested { delta: self.volume_step });
            }
            KeyCode::Char('-') => {
                events.push(UiEvent::VolumeStepRequested { delta: -self.volume_step });
            }
            _ => {
                if let Some(action) = dispatch_shortcut(&key, InputFocus::Browse) {
                    events.push(action.into_event());
                }
            }
        }
    }
}

/// Borrowed pieces of the renderer handed to the draw closure.
struct ViewState<'a> {
    list_state: &'a mut ListState,
    panel_state: &'a mut ListState,
    prompt: Option<Prompt>,
    input: &'a str,
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!("♪ {} ♪", APP_NAME),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if !state.ui.voice_status.is_empty() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            state.ui.voice_status.clone(),
            Style::default().fg(theme.muted),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_track_list(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    navigation: &NavigationResolver,
    theme: &Theme,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = navigation
        .tracks()
        .iter()
        .map(|track| {
            let liked = state.favorites.contains(&track.id);
            let playing = state.playback.now_playing == Some(track.position);
            let mut spans = vec![
                Span::raw(format!("{:3}. ", track.position + 1)),
                Span::styled(
                    if liked { "♥ " } else { "♡ " },
                    Style::default().fg(if liked { theme.favorite } else { theme.muted }),
                ),
                Span::raw(track.to_string()),
            ];
            if playing {
                spans.push(Span::styled(" ♪", Style::default().fg(theme.accent)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_title = format!(" Library ({} songs) ", navigation.len());

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, list_state);
}

fn draw_now_playing(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    navigation: &NavigationResolver,
    theme: &Theme,
) {
    let track = state.playback.now_playing.and_then(|i| navigation.track(i));
    let content = match track {
        Some(track) => {
            let status = if state.playback.is_paused { "⏸ PAUSED" } else { "▶ PLAYING" };
            vec![Line::from(vec![
                Span::styled(status, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(track.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", format_elapsed(state.playback.elapsed)),
                    Style::default().fg(theme.muted),
                ),
            ])]
        }
        None => vec![Line::from("No song playing")],
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(" Now Playing "));
    f.render_widget(paragraph, area);
}

fn draw_controls(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let shuffle_style = if state.playback.shuffle {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.muted)
    };
    let voice_label = if state.ui.voice_listening { "Listening..." } else { "Voice" };

    let controls = Paragraph::new(Line::from(vec![
        Span::styled(" 🔀 Shuffle ", shuffle_style),
        Span::raw(" "),
        Span::raw(format!("🔁 Repeat: {}", state.playback.repeat.label())),
        Span::raw("  "),
        Span::raw(format!("🌓 {}", theme.toggle_label())),
        Span::raw("  "),
        Span::raw(format!("🔊 {}%", volume_percent(state.playback.volume))),
        Span::raw("  "),
        Span::raw(format!("🎙 {}", voice_label)),
        Span::styled(
            "   Enter: Play • Space: Pause • ←/→: Prev/Next • *: Like • f: Liked • h: Recent • :: Command • q: Quit",
            Style::default().fg(theme.muted),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(controls, area);
}

fn draw_prompt(f: &mut Frame, area: Rect, prompt: Prompt, input: &str, theme: &Theme) {
    let (label, title) = match prompt {
        Prompt::Command => (": ", " Command "),
        Prompt::Voice => ("🎙 ", " Listening... "),
    };

    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(theme.accent)),
        Span::raw(input.to_string()),
        Span::styled("█", Style::default().fg(theme.muted)),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_liked_panel(
    f: &mut Frame,
    state: &AppState,
    navigation: &NavigationResolver,
    theme: &Theme,
    panel_state: &mut ListState,
) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" ❤️ Liked Songs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.favorite));

    if state.favorites.is_empty() {
        let empty = Paragraph::new("No liked songs yet")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .favorites
        .iter()
        .map(|id| ListItem::new(entry_label(id, navigation)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, panel_state);
}

fn draw_recent_drawer(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    navigation: &NavigationResolver,
    theme: &Theme,
    panel_state: &mut ListState,
) {
    let block = Block::default()
        .title(" 🕘 Recently Played ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if state.recent.is_empty() {
        let empty = Paragraph::new("No songs played yet")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .recent
        .iter()
        .map(|id| ListItem::new(entry_label(id, navigation)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, panel_state);
}

/// Stored ids whose track has gone missing are shown dimmed by their raw id.
fn entry_label(id: &TrackId, navigation: &NavigationResolver) -> Line<'static> {
    match navigation.position_of(id).and_then(|i| navigation.track(i)) {
        Some(track) => Line::from(track.to_string()),
        None => Line::from(Span::styled(
            id.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    }
}

fn draw_toasts(f: &mut Frame, state: &AppState, theme: &Theme) {
    let area = f.area();
    for (row, text) in state.toasts.visible().enumerate() {
        let width = (text.chars().count() as u16 + 4).min(area.width);
        let y = area.y + 1 + (row as u16) * 3;
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(text.to_string())
                .style(Style::default().fg(theme.foreground))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.accent))),
            rect,
        );
    }
}

impl UiRenderer for TuiRenderer {
    fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        if let Some(mut terminal) = self.terminal.take() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn render(&mut self, state: &AppState, navigation: &NavigationResolver) -> Result<()> {
        self.sync(state, navigation);

        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };

        let mut view = ViewState {
            list_state: &mut self.list_state,
            panel_state: &mut self.panel_state,
            prompt: self.prompt,
            input: &self.input,
        };
        let drawn = terminal
            .draw(|f| Self::draw_ui(f, state, navigation, &mut view))
            .map(|_| ());
        self.terminal = Some(terminal);
        drawn?;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if !event::poll(Duration::from_millis(0))? {
            return Ok(events);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(events);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(events);
        }

        // Prompt takes priority, then the open panel
        if let Some(prompt) = self.prompt {
            self.handle_prompt_key(key, prompt, &mut events);
        } else if !self.handle_panel_key(key, &mut events) {
            self.handle_browse_key(key, &mut events);
        }

        Ok(events)
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
