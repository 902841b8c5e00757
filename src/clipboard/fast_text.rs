use arboard::Clipboard;

use super::backend::FastText;
use crate::error::{ClipboardError, Result};

/// Fast text backend over `arboard`
pub struct ArboardText {
    clipboard: Clipboard,
}

impl ArboardText {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().map_err(|e| {
            log::debug!("arboard clipboard unavailable: {}", e);
            ClipboardError::BackendUnavailable("fast text library")
        })?;

        log::debug!("ArboardText initialized successfully");
        Ok(ArboardText { clipboard })
    }
}

impl FastText for ArboardText {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::native("arboard set_text", e.to_string()))?;

        log::debug!("Wrote {} bytes text via arboard", text.len());
        Ok(())
    }

    fn paste(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::native("arboard get_text", e.to_string())),
        }
    }
}
