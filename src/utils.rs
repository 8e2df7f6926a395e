use std::time::Duration;

pub const APP_NAME: &str = "encore";

pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "m4a"];

/// Environment variable that relocates the configuration directory.
pub const CONFIG_DIR_ENV: &str = "ENCORE_CONFIG_DIR";

/// Render a volume multiplier (0.0-1.0) as a whole percentage.
pub fn volume_percent(volume: f32) -> u8 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Formats a duration as M:SS, or H:MM:SS past the hour
pub fn format_elapsed(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
