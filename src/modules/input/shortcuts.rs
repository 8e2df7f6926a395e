use crate::core::events::UiEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Where keystrokes are currently going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    /// The track list or an overlay; shortcuts apply
    Browse,
    /// A text prompt; every key belongs to the prompt
    TextInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    TogglePause,
    Next,
    Previous,
    LikeCurrent,
    ToggleShuffle,
    CycleRepeat,
    ToggleDark,
}

impl ShortcutAction {
    pub fn into_event(self) -> UiEvent {
        match self {
            ShortcutAction::TogglePause => UiEvent::TogglePauseRequested,
            ShortcutAction::Next => UiEvent::NextTrackRequested,
            ShortcutAction::Previous => UiEvent::PreviousTrackRequested,
            ShortcutAction::LikeCurrent => UiEvent::LikeCurrentRequested,
            ShortcutAction::ToggleShuffle => UiEvent::ShuffleToggleRequested,
            ShortcutAction::CycleRepeat => UiEvent::RepeatCycleRequested,
            ShortcutAction::ToggleDark => UiEvent::DarkToggleRequested,
        }
    }
}

/// Map a key press to a global shortcut. Keys typed into a prompt never are.
pub fn dispatch_shortcut(key: &KeyEvent, focus: InputFocus) -> Option<ShortcutAction> {
    if focus == InputFocus::TextInput {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char(' ') => Some(ShortcutAction::TogglePause),
        KeyCode::Right => Some(ShortcutAction::Next),
        KeyCode::Left => Some(ShortcutAction::Previous),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'l' => Some(ShortcutAction::LikeCurrent),
            's' => Some(ShortcutAction::ToggleShuffle),
            'r' => Some(ShortcutAction::CycleRepeat),
            'd' => Some(ShortcutAction::ToggleDark),
            _ => None,
        },
        _ => None,
    }
}
