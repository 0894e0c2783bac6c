use std::time::{Duration, Instant};

/// How long an acknowledgment stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Identifies one notification. Dismissing through a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckHandle(u64);

#[derive(Debug, Clone)]
struct ActiveToast {
    handle: AckHandle,
    message: String,
    expires_at: Instant,
}

/// Single-slot transient acknowledgment surface.
///
/// A new notification replaces the current one together with its deadline,
/// so an older message's expiry can never dismiss a newer message. Expiry is
/// evaluated against the clock passed in by the event loop.
#[derive(Debug)]
pub struct Toast {
    active: Option<ActiveToast>,
    next_id: u64,
    duration: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(TOAST_DURATION)
    }
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: None,
            next_id: 0,
            duration,
        }
    }

    /// Show `message` from `now`, replacing any pending one
    pub fn notify_at(&mut self, message: impl Into<String>, now: Instant) -> AckHandle {
        self.next_id += 1;
        let handle = AckHandle(self.next_id);
        self.active = Some(ActiveToast {
            handle,
            message: message.into(),
            expires_at: now + self.duration,
        });
        handle
    }

    pub fn notify(&mut self, message: impl Into<String>) -> AckHandle {
        self.notify_at(message, Instant::now())
    }

    /// Dismiss early, only if `handle` is still the active notification
    pub fn dismiss(&mut self, handle: AckHandle) -> bool {
        if self.active.as_ref().is_some_and(|t| t.handle == handle) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Drop the active notification once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if self.active.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.active = None;
        }
    }

    /// Message visible at `now`, if any
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|t| now < t.expires_at)
            .map(|t| t.message.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    /// Time left until the active message expires
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|t| t.expires_at.saturating_duration_since(now))
    }
}
