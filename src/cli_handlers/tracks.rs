use crate::cli_handlers::{CliCommand, CommandContext};
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;
use std::path::PathBuf;

pub struct TracksCommand {
    pub dir: Option<PathBuf>,
}

impl CliCommand for TracksCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let tracks = ctx.library(self.dir)?;
        let ui = TerminalRenderer::new();

        if tracks.is_empty() {
            ui.print_error("No playable files found.");
            return Ok(());
        }

        ui.print_tracks(&tracks);
        ui.print_message(&format!("✓ Found {} songs.", tracks.len()));

        Ok(())
    }
}
