use ratatui::style::Color;

/// Colors used by the TUI, picked from the persisted dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub favorite: Color,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self {
                dark,
                background: Color::Black,
                foreground: Color::Gray,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                highlight: Color::Rgb(40, 40, 60),
                favorite: Color::LightRed,
            }
        } else {
            Self {
                dark,
                background: Color::Reset,
                foreground: Color::Reset,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight: Color::Rgb(220, 220, 235),
                favorite: Color::Red,
            }
        }
    }

    /// Label of the dark-mode button: the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        if self.dark { "Light" } else { "Dark" }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_dark(false)
    }
}

/// Toast for a dark-mode change.
pub fn dark_toast(enabled: bool) -> (&'static str, &'static str) {
    if enabled {
        ("Dark Mode Enabled", "🌙")
    } else {
        ("Light Mode Enabled", "☀️")
    }
}
