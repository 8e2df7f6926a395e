use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, PlaybackEvent};
use crate::modules::navigation::resolver::Transition;
use anyhow::Result;

/// Handles all [`PlaybackEvent`] variants.
///
/// Responsible for:
/// - Keeping the resolver's current index in step with what started playing
/// - Recording history and publishing media-session metadata on track start
/// - Deciding what follows a finished track
pub struct PlaybackHandler;

impl PlaybackHandler {
    pub fn handle(&self, event: &PlaybackEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            PlaybackEvent::TrackStarted { index } => {
                ctx.navigation.notify_track_started(*index);

                let Some(track) = ctx.navigation.track(*index) else {
                    return Ok(());
                };

                ctx.state.recent.record(&track.id);
                if let Err(e) = ctx
                    .preferences
                    .set_recently_played(ctx.state.recent.as_slice())
                {
                    log::warn!("Could not save play history: {:#}", e);
                }

                ctx.media.reflect_track(Some(track));
                ctx.media.reflect_playback(true);
            }

            PlaybackEvent::TrackEnded => match ctx.navigation.on_track_ended(&mut *ctx.surface) {
                Transition::Restart(index) | Transition::Jump(index) => {
                    ctx.emit(AppEvent::Playback(PlaybackEvent::TrackStarted { index }))?;
                }
                Transition::Stay => {
                    log::debug!("Playback finished, nothing queued");
                    ctx.emit(AppEvent::Playback(PlaybackEvent::Paused))?;
                }
            },

            PlaybackEvent::Paused => ctx.media.reflect_playback(false),

            PlaybackEvent::Resumed => ctx.media.reflect_playback(true),

            // State only, already handled by AppState::apply_event.
            PlaybackEvent::VolumeChanged { .. }
            | PlaybackEvent::ShuffleChanged { .. }
            | PlaybackEvent::RepeatChanged { .. } => {}
        }

        Ok(())
    }
}
