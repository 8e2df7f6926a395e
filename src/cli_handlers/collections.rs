use crate::cli_handlers::{CliCommand, CommandContext};
use crate::modules::navigation::resolver::NavigationResolver;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct FavoritesCommand;

impl CliCommand for FavoritesCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let favorites = ctx.preferences()?.favorites();
        let navigation = NavigationResolver::new(ctx.library_or_empty());

        let ui = TerminalRenderer::new();
        ui.print_ids("❤️ Liked Songs", &favorites, &navigation);

        Ok(())
    }
}

pub struct RecentCommand;

impl CliCommand for RecentCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let mut recent = ctx.preferences()?.recently_played();
        recent.truncate(ctx.config.recent_capacity);
        let navigation = NavigationResolver::new(ctx.library_or_empty());

        let ui = TerminalRenderer::new();
        ui.print_ids("🕘 Recently Played", &recent, &navigation);

        Ok(())
    }
}
