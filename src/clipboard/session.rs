use super::backend::{ClipboardApi, ClipboardFormat};
use crate::error::{ClipboardError, Result};

/// Open native clipboard, closed again when dropped
///
/// The clipboard lock is system-wide, so close must run on every exit
/// path. A failed close is logged and discarded.
pub struct ClipboardSession<'a, A: ClipboardApi + ?Sized> {
    api: &'a mut A,
}

impl<'a, A: ClipboardApi + ?Sized> ClipboardSession<'a, A> {
    pub fn open(api: &'a mut A) -> Result<Self> {
        api.open()?;
        Ok(ClipboardSession { api })
    }

    pub fn empty(&mut self) -> Result<()> {
        self.api.empty()
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.api.set_text(text)
    }

    pub fn get_text(&mut self) -> Result<Option<String>> {
        self.api.get_text()
    }

    pub fn set_dib(&mut self, dib: &[u8]) -> Result<()> {
        self.api.set_dib(dib)
    }

    pub fn is_format_available(&self, format: ClipboardFormat) -> bool {
        self.api.is_format_available(format)
    }
}

impl<A: ClipboardApi + ?Sized> Drop for ClipboardSession<'_, A> {
    fn drop(&mut self) {
        if let Err(e) = self.api.close() {
            let err = ClipboardError::ResourceCleanup(e.to_string());
            log::warn!("{}", err);
        }
    }
}

/// Replace the clipboard content with text
pub fn write_text<A: ClipboardApi + ?Sized>(api: &mut A, text: &str) -> Result<()> {
    let mut session = ClipboardSession::open(api)?;
    session.empty()?;
    session.set_text(text)?;
    log::debug!("Wrote {} bytes text to native clipboard", text.len());
    Ok(())
}

/// Read text, `None` when no text format is on the clipboard
pub fn read_text<A: ClipboardApi + ?Sized>(api: &mut A) -> Result<Option<String>> {
    let mut session = ClipboardSession::open(api)?;
    if !session.is_format_available(ClipboardFormat::UnicodeText) {
        log::debug!("Native clipboard holds no text");
        return Ok(None);
    }
    session.get_text()
}

/// Replace the clipboard content with a CF_DIB payload
pub fn write_dib<A: ClipboardApi + ?Sized>(api: &mut A, dib: &[u8]) -> Result<()> {
    let mut session = ClipboardSession::open(api)?;
    session.empty()?;
    session.set_dib(dib)?;
    log::debug!("Wrote {} bytes DIB to native clipboard", dib.len());
    Ok(())
}

pub fn empty<A: ClipboardApi + ?Sized>(api: &mut A) -> Result<()> {
    let mut session = ClipboardSession::open(api)?;
    session.empty()
}
