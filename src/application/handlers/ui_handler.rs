use crate::application::handlers::HandlerContext;
use crate::application::handlers::voice_handler::VoiceHandler;
use crate::core::events::{AppEvent, PlaybackEvent, UiEvent};
use crate::core::models::TrackId;
use crate::modules::ui::theme::dark_toast;
use anyhow::Result;

/// Handles all [`UiEvent`] variants that require side effects.
///
/// Responsible for:
/// - Translating user intent into resolver calls (pick, next, previous)
/// - Driving the surface directly for pause, resume and volume
/// - Persisting shuffle, repeat, dark mode and favorites, with a toast each
///
/// Pure state updates (SelectionChanged, panel toggles, Toast) are already
/// handled by `AppState::apply_event`.
pub struct UiHandler;

impl UiHandler {
    pub fn handle(&self, event: &UiEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            UiEvent::TrackPicked { index } => ctx.select(*index)?,

            UiEvent::NextTrackRequested => ctx.advance()?,

            UiEvent::PreviousTrackRequested => ctx.retreat()?,

            UiEvent::TogglePauseRequested => {
                if ctx.surface.is_paused() {
                    Self::resume(ctx)?;
                } else {
                    Self::pause(ctx)?;
                }
            }

            UiEvent::PauseRequested => Self::pause(ctx)?,

            UiEvent::ResumeRequested => Self::resume(ctx)?,

            UiEvent::VolumeStepRequested { delta } => {
                let volume = (ctx.surface.volume() + delta).clamp(0.0, 1.0);
                ctx.surface.set_volume(volume);
                ctx.emit(AppEvent::Playback(PlaybackEvent::VolumeChanged { volume }))?;
            }

            UiEvent::ShuffleToggleRequested => {
                let enabled = !ctx.navigation.is_shuffle_enabled();
                Self::apply_shuffle(ctx, enabled)?;
            }

            UiEvent::ShuffleSet { enabled } => Self::apply_shuffle(ctx, *enabled)?,

            UiEvent::RepeatCycleRequested => {
                let mode = ctx.navigation.cycle_repeat();
                if let Err(e) = ctx.preferences.set_repeat_mode(mode) {
                    log::warn!("Could not save repeat mode: {:#}", e);
                }
                ctx.toast(&format!("Repeat: {}", mode.label()), "🔁")?;
                ctx.emit(AppEvent::Playback(PlaybackEvent::RepeatChanged { mode }))?;
            }

            UiEvent::DarkToggleRequested => {
                let enabled = !ctx.state.dark;
                Self::apply_dark(ctx, enabled)?;
            }

            UiEvent::DarkSet { enabled } => Self::apply_dark(ctx, *enabled)?,

            UiEvent::FavoriteToggleRequested { index } => ctx.toggle_favorite(*index)?,

            UiEvent::LikeCurrentRequested => {
                match ctx.navigation.resolve_current_index(&*ctx.surface) {
                    Some(index) => ctx.toggle_favorite(index)?,
                    None => log::debug!("Nothing is playing, nothing to like"),
                }
            }

            UiEvent::FavoritePicked { id } | UiEvent::RecentPicked { id } => {
                Self::pick_by_id(ctx, id)?;
            }

            UiEvent::VoiceToggleRequested | UiEvent::VoiceTranscript { .. } => {
                VoiceHandler.handle(event, ctx)?;
            }

            UiEvent::QuitRequested => {
                ctx.emit(AppEvent::Shutdown)?;
            }

            // Pure state updates, already handled by AppState::apply_event.
            UiEvent::SelectionChanged { .. }
            | UiEvent::LikedPanelToggled
            | UiEvent::RecentDrawerToggled
            | UiEvent::Toast { .. } => {}
        }

        Ok(())
    }

    fn pause(ctx: &mut HandlerContext) -> Result<()> {
        if ctx.surface.is_paused() {
            return Ok(());
        }
        ctx.surface.pause();
        ctx.emit(AppEvent::Playback(PlaybackEvent::Paused))
    }

    fn resume(ctx: &mut HandlerContext) -> Result<()> {
        if ctx.surface.active_source().is_none() {
            log::debug!("Nothing loaded to resume");
            return Ok(());
        }
        if !ctx.surface.is_paused() {
            return Ok(());
        }
        ctx.surface.play();
        ctx.emit(AppEvent::Playback(PlaybackEvent::Resumed))
    }

    /// Enable or disable shuffle; enabling always starts a fresh order.
    fn apply_shuffle(ctx: &mut HandlerContext, enabled: bool) -> Result<()> {
        ctx.navigation.set_shuffle(enabled);
        if let Err(e) = ctx.preferences.set_shuffle(enabled) {
            log::warn!("Could not save shuffle: {:#}", e);
        }

        if enabled {
            ctx.toast("Shuffle Enabled", "🔀")?;
        } else {
            ctx.toast("Shuffle Disabled", "❌")?;
        }

        ctx.emit(AppEvent::Playback(PlaybackEvent::ShuffleChanged { enabled }))
    }

    fn apply_dark(ctx: &mut HandlerContext, enabled: bool) -> Result<()> {
        ctx.state.dark = enabled;
        if let Err(e) = ctx.preferences.set_dark(enabled) {
            log::warn!("Could not save dark mode: {:#}", e);
        }

        let (message, emoji) = dark_toast(enabled);
        ctx.toast(message, emoji)
    }

    fn pick_by_id(ctx: &mut HandlerContext, id: &TrackId) -> Result<()> {
        match ctx.navigation.position_of(id) {
            Some(index) => ctx.select(index),
            None => {
                log::debug!("{} is not in the track list", id);
                Ok(())
            }
        }
    }
}
