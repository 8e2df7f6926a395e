use crate::cli::{RepeatArg, Switch};
use crate::cli_handlers::{CliCommand, CommandContext, dispatch_once};
use crate::core::events::UiEvent;
use crate::core::models::RepeatMode;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

// ── Shuffle ───────────────────────────────────────────────────────────────────
pub struct ShuffleCommand {
    pub state: Option<Switch>,
}

impl CliCommand for ShuffleCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let mut app = ctx.headless(Vec::new())?;

        let event = match self.state {
            Some(state) => UiEvent::ShuffleSet { enabled: state.enabled() },
            None => UiEvent::ShuffleToggleRequested,
        };
        dispatch_once(&mut app, event)?;

        let ui = TerminalRenderer::new();
        for toast in app.state().toasts.visible() {
            ui.print_message(toast);
        }

        Ok(())
    }
}

// ── Repeat ────────────────────────────────────────────────────────────────────
pub struct RepeatCommand {
    pub mode: Option<RepeatArg>,
}

impl CliCommand for RepeatCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let ui = TerminalRenderer::new();

        let mode = match self.mode {
            Some(arg) => {
                let mode = RepeatMode::from(arg);
                ctx.preferences()?.set_repeat_mode(mode)?;
                mode
            }
            None => {
                let mut app = ctx.headless(Vec::new())?;
                dispatch_once(&mut app, UiEvent::RepeatCycleRequested)?;
                app.navigation().repeat_mode()
            }
        };

        ui.print_message(&format!(
            "🔁 Repeat: {} {}",
            mode.label(),
            repeat_mode_description(mode)
        ));

        Ok(())
    }
}

/// Human-readable label used in terminal feedback messages
fn repeat_mode_description(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::None => "(stop at end)",
        RepeatMode::All => "(loop track list)",
        RepeatMode::One => "(repeat current song)",
    }
}

// ── Dark mode ─────────────────────────────────────────────────────────────────
pub struct DarkCommand {
    pub state: Option<Switch>,
}

impl CliCommand for DarkCommand {
    fn execute(self: Box<Self>, ctx: &CommandContext) -> Result<()> {
        let mut app = ctx.headless(Vec::new())?;

        let event = match self.state {
            Some(state) => UiEvent::DarkSet { enabled: state.enabled() },
            None => UiEvent::DarkToggleRequested,
        };
        dispatch_once(&mut app, event)?;

        let ui = TerminalRenderer::new();
        for toast in app.state().toasts.visible() {
            ui.print_message(toast);
        }

        Ok(())
    }
}
