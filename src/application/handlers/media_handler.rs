use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, MediaAction};
use crate::modules::input::media_session::action_event;
use anyhow::Result;

/// Turns OS media-session actions into the matching UI requests.
pub struct MediaHandler;

impl MediaHandler {
    pub fn handle(&self, action: MediaAction, ctx: &mut HandlerContext) -> Result<()> {
        log::debug!("Media action {:?}", action);
        ctx.emit(AppEvent::Ui(action_event(action)))
    }
}
