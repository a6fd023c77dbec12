use std::time::{Duration, Instant};

pub use pianola_types::StatusLevel;

fn ttl(level: StatusLevel) -> Duration {
    match level {
        StatusLevel::Info => Duration::from_secs(3),
        StatusLevel::Warning => Duration::from_secs(5),
        StatusLevel::Error => Duration::from_secs(8),
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub timestamp: Instant,
}

impl StatusMessage {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.timestamp) > ttl(self.level)
    }
}

/// Transient notices shown on the bottom border.
pub struct StatusBar {
    messages: Vec<StatusMessage>,
    max: usize,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max: 16,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.push_at(text, level, Instant::now());
    }

    fn push_at(&mut self, text: impl Into<String>, level: StatusLevel, timestamp: Instant) {
        self.messages.push(StatusMessage { text: text.into(), level, timestamp });
        if self.messages.len() > self.max {
            self.messages.remove(0);
        }
    }

    /// Returns the most recent non-expired message, if any.
    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_at(Instant::now())
    }

    fn current_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.messages.iter().rev().find(|m| !m.is_expired(now))
    }
}
