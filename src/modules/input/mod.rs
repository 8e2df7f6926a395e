pub mod media_session;
pub mod shortcuts;
pub mod voice;
