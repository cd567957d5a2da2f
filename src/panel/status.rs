use std::time::{Duration, Instant};

pub const STATUS_LIFETIME: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub expires_at: Instant,
}

/// Single-slot banner. Publishing replaces the pending message and its expiry.
#[derive(Debug, Clone, Default)]
pub struct StatusBanner {
    current: Option<StatusMessage>,
}

impl StatusBanner {
    pub fn publish(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        let message = StatusMessage {
            kind,
            text: text.into(),
            expires_at: now + STATUS_LIFETIME,
        };
        tracing::debug!("Status {:?}: {}", message.kind, message.text);
        self.current = Some(message);
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.current.as_ref().map(|m| m.expires_at)
    }

    /// Clears the message once its expiry has passed. Returns true if it cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
