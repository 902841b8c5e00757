use std::fmt;

use crate::error::Result;

/// The interchangeable mechanisms a text operation can be served by
///
/// Declaration order is text priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    /// Cross-platform clipboard library
    FastText,
    /// Native OS clipboard API
    Native,
    /// Hidden toolkit window owning the clipboard
    Gui,
}

impl BackendKind {
    /// Get the backend name (for logging/debugging)
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::FastText => "fast-text",
            BackendKind::Native => "native",
            BackendKind::Gui => "gui",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clipboard formats the native backend reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFormat {
    /// CF_UNICODETEXT
    UnicodeText,
    /// CF_DIB: BITMAPINFOHEADER followed by pixel data
    Dib,
}

/// Fast text library: copy and paste, nothing else
pub trait FastText {
    fn copy(&mut self, text: &str) -> Result<()>;

    /// `None` when the clipboard holds no text
    fn paste(&mut self) -> Result<Option<String>>;
}

/// Native clipboard primitives
///
/// Every call except `open` requires the clipboard to be open. Use
/// `ClipboardSession` rather than pairing `open`/`close` by hand.
pub trait ClipboardApi {
    fn open(&mut self) -> Result<()>;
    fn empty(&mut self) -> Result<()>;
    fn set_text(&mut self, text: &str) -> Result<()>;
    /// Text up to the first NUL; CF_UNICODETEXT is NUL-terminated
    fn get_text(&mut self) -> Result<Option<String>>;
    fn set_dib(&mut self, dib: &[u8]) -> Result<()>;
    fn is_format_available(&self, format: ClipboardFormat) -> bool;
    fn close(&mut self) -> Result<()>;
}

/// GUI toolkit clipboard fallback, backed by one hidden top-level window
pub trait GuiToolkit {
    fn clipboard_clear(&mut self) -> Result<()>;

    /// Append to the text placed since the last clear
    fn clipboard_append(&mut self, text: &str) -> Result<()>;

    fn clipboard_get(&mut self) -> Result<Option<String>>;

    /// Destroy the window; called at most once
    fn destroy(&mut self) -> Result<()>;
}

/// Acquires backends during probing
///
/// An `Err` means the backend is unavailable; it is never fatal.
pub trait BackendFactory {
    fn fast_text(&self) -> Result<Box<dyn FastText>>;
    fn native(&self) -> Result<Box<dyn ClipboardApi>>;
    fn gui(&self) -> Result<Box<dyn GuiToolkit>>;
}
