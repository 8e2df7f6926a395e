use crate::application::app::Application;
use crate::cli_handlers::{CliCommand, CommandContext};
use crate::core::events::{AppEvent, UiEvent};
use crate::core::models::Capability;
use crate::core::traits::{MediaSessionHost, PlayerSurface, SpeechRecognizer, UiRenderer};
use crate::modules::input::media_session::{MediaSessionBridge, SouvlakiHost};
use crate::modules::input::voice::{PromptRecognizer, VoiceControl};
use crate::modules::playback::rodio_backend::RodioSurface;
use crate::modules::playback::silent_surface::SilentSurface;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::modules::ui::tui::renderer::TuiRenderer;
use anyhow::Result;
use std::path::PathBuf;

pub struct PlayCommand {
    pub dir: Option<PathBuf>,
    pub plain: bool,
}

impl CliCommand for PlayCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let config = &ctx.config;
        let tracks = ctx.library(self.dir)?;

        if tracks.is_empty() {
            let ui = TerminalRenderer::new();
            ui.print_error("No playable files found.");
            return Ok(());
        }

        let surface: Box<dyn PlayerSurface> = match RodioSurface::new() {
            Ok(surface) => Box::new(surface),
            Err(e) => {
                log::warn!("No audio output, continuing silently: {:#}", e);
                Box::new(SilentSurface::new())
            }
        };

        let voice = if config.voice_input {
            let recognizer: Box<dyn SpeechRecognizer> = Box::new(PromptRecognizer::new());
            VoiceControl::new(Capability::Present(recognizer), &config.voice_language)
        } else {
            VoiceControl::unsupported()
        };

        let renderer: Box<dyn UiRenderer> = if self.plain {
            Box::new(TerminalRenderer::new())
        } else {
            Box::new(TuiRenderer::new(config.volume_step))
        };

        let app = Application::new(tracks, ctx.preferences()?)
            .with_config(config)
            .with_surface(surface)
            .with_voice(voice)
            .with_ui_renderer(renderer);

        let host = if config.media_session {
            match SouvlakiHost::new(app.event_sender()) {
                Ok(host) => Capability::Present(Box::new(host) as Box<dyn MediaSessionHost>),
                Err(e) => {
                    log::warn!("Media keys unavailable: {:#}", e);
                    Capability::Absent
                }
            }
        } else {
            Capability::Absent
        };
        let mut app = app.with_media_session(MediaSessionBridge::new(host));

        app.init()?;

        // The plain view has no list to pick from, so start at the top of the order
        if self.plain {
            app.event_sender().send(AppEvent::Ui(UiEvent::NextTrackRequested))?;
        }

        let result = app.run();
        app.cleanup()?;
        result
    }
}
