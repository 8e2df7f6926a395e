use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::models::RepeatMode;
use crate::utils::APP_NAME;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Terminal music player with favorites, shuffle, repeat and voice commands", long_about = None)]
pub struct Cli {
    /// Config file (defaults to config.toml in the config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the player over a music directory
    Play {
        /// Music directory (defaults to the configured one)
        dir: Option<PathBuf>,

        /// Single status line instead of the full screen interface
        #[arg(long)]
        plain: bool,
    },

    /// List the tracks found in a music directory
    Tracks {
        /// Music directory (defaults to the configured one)
        dir: Option<PathBuf>,
    },

    /// Show liked songs
    Favorites,

    /// Show recently played songs, newest first
    Recent,

    /// Turn shuffle on or off (toggles when omitted)
    Shuffle {
        #[arg(value_enum)]
        state: Option<Switch>,
    },

    /// Set the repeat mode (cycles when omitted)
    Repeat {
        #[arg(value_enum)]
        mode: Option<RepeatArg>,
    },

    /// Turn dark mode on or off (toggles when omitted)
    Dark {
        #[arg(value_enum)]
        state: Option<Switch>,
    },

    /// Interpret a spoken-style command, e.g. "play yellow" or "shuffle on"
    Say {
        /// The phrase, as it would be heard
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        self == Switch::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    None,
    One,
    All,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::None => RepeatMode::None,
            RepeatArg::One => RepeatMode::One,
            RepeatArg::All => RepeatMode::All,
        }
    }
}
