//! Copy-to-clipboard with a transient acknowledgment.

pub mod clipboard;
pub mod toast;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use toast::{AckHandle, Toast, TOAST_DURATION};

use crate::error::Result;
use std::time::Instant;
use tracing::warn;

/// Clipboard writes paired with the toast surface.
///
/// Notified copies never propagate clipboard failures: they are logged and
/// acknowledged with the failure message instead.
pub struct ClipboardFeedback<C: Clipboard> {
    clipboard: C,
    toast: Toast,
}

impl<C: Clipboard> ClipboardFeedback<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            toast: Toast::default(),
        }
    }

    /// Write `text`. A failure is logged and handed back for the caller to acknowledge.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).inspect_err(|e| warn!("{e}"))
    }

    pub fn notify(&mut self, message: impl Into<String>) -> AckHandle {
        self.toast.notify(message)
    }

    /// Copy `text` and acknowledge with `message`, or with the failure text
    pub fn copy_and_notify_at(&mut self, text: &str, message: &str, now: Instant) -> AckHandle {
        match self.copy(text) {
            Ok(()) => self.toast.notify_at(message, now),
            Err(e) => self.toast.notify_at(e.user_message(), now),
        }
    }

    pub fn copy_and_notify(&mut self, text: &str, message: &str) -> AckHandle {
        self.copy_and_notify_at(text, message, Instant::now())
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}
