use crate::error::{Error, Result};

/// Clipboard abstraction so copy actions can be exercised without a display.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

/// System clipboard using arboard. The handle is opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard> {
        let inner = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| Error::ClipboardWriteFailed(e.to_string()))?,
        };
        Ok(self.inner.insert(inner))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::ClipboardWriteFailed(e.to_string()))
    }
}

/// In-memory clipboard, for tests and headless sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// When set, every write fails with this reason
    pub fail_with: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(Error::ClipboardWriteFailed(reason.clone()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
