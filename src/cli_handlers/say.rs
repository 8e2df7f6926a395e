use crate::cli_handlers::{CliCommand, CommandContext, dispatch_once};
use crate::modules::input::voice::parse_voice_command;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

/// Runs a phrase through the voice command parser against the library.
///
/// Setting commands (shuffle, dark mode) are applied and persisted. Playback
/// commands are only reported: there is no audio output in one-shot mode and
/// nothing is current, so acting on them would only write a false history.
pub struct SayCommand {
    pub phrase: String,
}

impl CliCommand for SayCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let tracks = ctx.library_or_empty();
        let ui = TerminalRenderer::new();

        ui.print_message(&format!("Heard: {}", self.phrase.trim().to_lowercase()));

        let Some(command) = parse_voice_command(&self.phrase, &tracks) else {
            ui.print_message("Command not recognized");
            return Ok(());
        };
        let description = command.describe(&tracks);

        if !command.is_setting() {
            ui.print_message(&format!("→ {} (not played in one-shot mode)", description));
            return Ok(());
        }

        ui.print_message(&format!("→ {}", description));

        let mut app = ctx.headless(tracks)?;
        dispatch_once(&mut app, command.into_event(ctx.config.volume_step))?;
        for toast in app.state().toasts.visible() {
            ui.print_message(toast);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;
    use tempfile::tempdir;

    fn context(dir: &std::path::Path, music: &std::path::Path) -> CommandContext {
        let config = AppConfig {
            music_dir: Some(music.to_path_buf()),
            ..AppConfig::default()
        };
        CommandContext::new(config, dir.to_path_buf())
    }

    #[test]
    fn shuffle_phrase_persists() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), &dir.path().join("missing"));

        Box::new(SayCommand { phrase: "Shuffle on".to_string() }).execute(&ctx).unwrap();

        assert!(ctx.preferences().unwrap().shuffle());
    }

    #[test]
    fn play_phrase_leaves_history_untouched() {
        let dir = tempdir().unwrap();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        fs::write(music.join("yellow.mp3"), b"").unwrap();
        let ctx = context(dir.path(), &music);
        assert_eq!(ctx.library(None).unwrap().len(), 1);

        Box::new(SayCommand { phrase: "play yellow".to_string() }).execute(&ctx).unwrap();
        Box::new(SayCommand { phrase: "skip".to_string() }).execute(&ctx).unwrap();

        let prefs = ctx.preferences().unwrap();
        assert!(prefs.recently_played().is_empty());
        assert!(prefs.favorites().is_empty());
    }
}
