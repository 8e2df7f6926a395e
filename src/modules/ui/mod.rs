pub mod terminal;
pub mod theme;
pub mod toast;
pub mod tui;
