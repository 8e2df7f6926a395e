use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2600);
pub const DEFAULT_EMOJI: &str = "🔔";

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub expires_at: Instant,
}

/// Short-lived notifications, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
        }
    }

    pub fn show(&mut self, message: &str, emoji: Option<&str>) {
        self.show_at(message, emoji, Instant::now());
    }

    pub fn show_at(&mut self, message: &str, emoji: Option<&str>, now: Instant) {
        let text = format!("{} {}", emoji.unwrap_or(DEFAULT_EMOJI), message);
        log::debug!("Toast: {}", text);
        self.toasts.push_back(Toast {
            text,
            expires_at: now + self.duration,
        });
    }

    /// Drop every toast whose time is up.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_emoji_before_message() {
        let mut toasts = ToastQueue::default();
        toasts.show("Shuffle Enabled", Some("🔀"));
        toasts.show("Saved", None);

        let visible: Vec<&str> = toasts.visible().collect();
        assert_eq!(visible, vec!["🔀 Shuffle Enabled", "🔔 Saved"]);
    }

    #[test]
    fn prune_removes_expired() {
        let start = Instant::now();
        let mut toasts = ToastQueue::new(Duration::from_millis(2600));
        toasts.show_at("first", None, start);
        toasts.show_at("second", None, start + Duration::from_millis(1000));

        toasts.prune(start + Duration::from_millis(2599));
        assert_eq!(toasts.visible().count(), 2);

        toasts.prune(start + Duration::from_millis(2600));
        assert_eq!(toasts.visible().collect::<Vec<_>>(), vec!["🔔 second"]);

        toasts.prune(start + Duration::from_millis(3600));
        assert!(toasts.is_empty());
    }
}
