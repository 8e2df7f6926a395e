use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, UiEvent};
use crate::modules::input::voice::{VoiceToggle, parse_voice_command};
use anyhow::Result;

/// Handles the voice session: toggling the recognizer and acting on
/// transcripts.
pub struct VoiceHandler;

impl VoiceHandler {
    pub fn handle(&self, event: &UiEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            UiEvent::VoiceToggleRequested => {
                if ctx.voice.toggle() == VoiceToggle::Unsupported {
                    ctx.toast("Speech recognition not supported", "⚠️")?;
                }
                ctx.sync_voice();
            }

            UiEvent::VoiceTranscript { text } => {
                let heard = ctx.voice.hear(text);
                ctx.sync_voice();

                match parse_voice_command(&heard, ctx.navigation.tracks()) {
                    Some(command) => {
                        log::info!("Voice command {:?} from {:?}", command, heard);
                        ctx.emit(AppEvent::Ui(command.into_event(ctx.volume_step)))?;
                    }
                    None => log::debug!("No command in {:?}", heard),
                }
            }

            _ => {}
        }

        Ok(())
    }
}
