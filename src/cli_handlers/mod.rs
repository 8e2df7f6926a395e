mod collections;
mod play;
mod say;
mod settings;
mod tracks;

pub use collections::{FavoritesCommand, RecentCommand};
pub use play::PlayCommand;
pub use say::SayCommand;
pub use settings::{DarkCommand, RepeatCommand, ShuffleCommand};
pub use tracks::TracksCommand;

use crate::application::app::Application;
use crate::cli::Commands;
use crate::config::AppConfig;
use crate::core::events::{AppEvent, UiEvent};
use crate::core::models::TrackDescriptor;
use crate::modules::library::scanner;
use crate::modules::storage::json_backend::JsonPreferenceStore;
use crate::modules::storage::preferences::Preferences;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Every CLI command implements this trait.
///
/// Commands own their arguments and are consumed on execution, so they run exactly once.
pub trait CliCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()>;
}

/// What every command needs: settings and where preferences live.
pub struct CommandContext {
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl CommandContext {
    pub fn new(config: AppConfig, data_dir: PathBuf) -> Self {
        Self { config, data_dir }
    }

    pub fn preferences(&self) -> Result<Preferences> {
        let store = JsonPreferenceStore::open_in(&self.data_dir)?;
        Ok(Preferences::new(Box::new(store)))
    }

    /// Scan the given directory, or the configured one.
    pub fn library(&self, dir: Option<PathBuf>) -> Result<Vec<TrackDescriptor>> {
        let root = self
            .config
            .music_dir(dir)
            .context("No music directory given and none configured")?;
        scanner::scan_directory(&root)
    }

    /// Like [`library`](Self::library), but listing commands still work
    /// without one.
    pub fn library_or_empty(&self) -> Vec<TrackDescriptor> {
        match self.library(None) {
            Ok(tracks) => tracks,
            Err(e) => {
                log::warn!("Library unavailable: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Headless application over the stored preferences.
    pub fn headless(&self, tracks: Vec<TrackDescriptor>) -> Result<Application> {
        let mut app = Application::new(tracks, self.preferences()?).with_config(&self.config);
        app.init()?;
        Ok(app)
    }
}

/// Send one UI event through a headless application and wait for it to settle.
pub(crate) fn dispatch_once(app: &mut Application, event: UiEvent) -> Result<()> {
    app.event_sender().send(AppEvent::Ui(event))?;
    app.run_once()?;
    app.cleanup()
}

/// Converts a parsed [`Commands`] variant into a boxed [`CliCommand`] ready to execute.
///
/// Keeping this in one place means `main.rs` never needs to know about concrete command types.
pub fn from_cli(cmd: Commands) -> Box<dyn CliCommand> {
    match cmd {
        Commands::Play { dir, plain } => Box::new(PlayCommand { dir, plain }),
        Commands::Tracks { dir } => Box::new(TracksCommand { dir }),
        Commands::Favorites => Box::new(FavoritesCommand),
        Commands::Recent => Box::new(RecentCommand),
        Commands::Shuffle { state } => Box::new(ShuffleCommand { state }),
        Commands::Repeat { mode } => Box::new(RepeatCommand { mode }),
        Commands::Dark { state } => Box::new(DarkCommand { state }),
        Commands::Say { phrase } => Box::new(SayCommand { phrase: phrase.join(" ") }),
    }
}
