//! In-memory backends sharing one fake OS clipboard, for unit tests

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::backend::{BackendFactory, ClipboardApi, ClipboardFormat, FastText, GuiToolkit};
use crate::error::{ClipboardError, Result};

#[derive(Debug, Default)]
pub struct ClipboardState {
    pub text: Option<String>,
    pub dib: Option<Vec<u8>>,
    pub open: bool,
    /// Every backend call as `backend:operation`
    pub calls: Vec<String>,
    /// Operation name that fails with `NativeApi`
    pub fail_on: Option<&'static str>,
    pub destroyed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeClipboard(Rc<RefCell<ClipboardState>>);

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> Ref<'_, ClipboardState> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ClipboardState> {
        self.0.borrow_mut()
    }

    /// Number of calls made through the native API
    pub fn native_calls(&self) -> usize {
        self.borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with("native:"))
            .count()
    }

    pub fn calls_for(&self, backend: &str) -> usize {
        let prefix = format!("{}:", backend);
        self.borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn record(&self, backend: &str, operation: &'static str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push(format!("{}:{}", backend, operation));
        if state.fail_on == Some(operation) {
            return Err(ClipboardError::native(operation, "injected failure"));
        }
        Ok(())
    }
}

pub struct FakeNative {
    clipboard: FakeClipboard,
}

impl FakeNative {
    pub fn new(clipboard: &FakeClipboard) -> Self {
        FakeNative {
            clipboard: clipboard.clone(),
        }
    }
}

impl ClipboardApi for FakeNative {
    fn open(&mut self) -> Result<()> {
        self.clipboard.record("native", "open")?;
        self.clipboard.borrow_mut().open = true;
        Ok(())
    }

    fn empty(&mut self) -> Result<()> {
        self.clipboard.record("native", "empty")?;
        let mut state = self.clipboard.borrow_mut();
        assert!(state.open, "empty called on a closed clipboard");
        state.text = None;
        state.dib = None;
        Ok(())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.record("native", "set_text")?;
        let mut state = self.clipboard.borrow_mut();
        assert!(state.open, "set_text called on a closed clipboard");
        state.text = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<Option<String>> {
        self.clipboard.record("native", "get_text")?;
        Ok(self.clipboard.borrow().text.clone())
    }

    fn set_dib(&mut self, dib: &[u8]) -> Result<()> {
        self.clipboard.record("native", "set_dib")?;
        let mut state = self.clipboard.borrow_mut();
        assert!(state.open, "set_dib called on a closed clipboard");
        state.dib = Some(dib.to_vec());
        Ok(())
    }

    fn is_format_available(&self, format: ClipboardFormat) -> bool {
        let _ = self.clipboard.record("native", "is_format_available");
        let state = self.clipboard.borrow();
        match format {
            ClipboardFormat::UnicodeText => state.text.is_some(),
            ClipboardFormat::Dib => state.dib.is_some(),
        }
    }

    fn close(&mut self) -> Result<()> {
        let result = self.clipboard.record("native", "close");
        self.clipboard.borrow_mut().open = false;
        result
    }
}

pub struct FakeFastText {
    clipboard: FakeClipboard,
}

impl FastText for FakeFastText {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard.record("fast", "copy")?;
        let mut state = self.clipboard.borrow_mut();
        state.text = Some(text.to_string());
        state.dib = None;
        Ok(())
    }

    fn paste(&mut self) -> Result<Option<String>> {
        self.clipboard.record("fast", "paste")?;
        Ok(self.clipboard.borrow().text.clone())
    }
}

pub struct FakeGui {
    clipboard: FakeClipboard,
    pending: String,
}

impl GuiToolkit for FakeGui {
    fn clipboard_clear(&mut self) -> Result<()> {
        self.clipboard.record("gui", "clipboard_clear")?;
        self.pending.clear();
        let mut state = self.clipboard.borrow_mut();
        state.text = None;
        state.dib = None;
        Ok(())
    }

    fn clipboard_append(&mut self, text: &str) -> Result<()> {
        self.clipboard.record("gui", "clipboard_append")?;
        self.pending.push_str(text);
        self.clipboard.borrow_mut().text = Some(self.pending.clone());
        Ok(())
    }

    fn clipboard_get(&mut self) -> Result<Option<String>> {
        self.clipboard.record("gui", "clipboard_get")?;
        Ok(self.clipboard.borrow().text.clone())
    }

    fn destroy(&mut self) -> Result<()> {
        self.clipboard.record("gui", "destroy")?;
        self.clipboard.borrow_mut().destroyed += 1;
        Ok(())
    }
}

/// Hands out fakes for the enabled backends, `BackendUnavailable` otherwise
pub struct FakeFactory {
    pub clipboard: FakeClipboard,
    pub fast_text: bool,
    pub native: bool,
    pub gui: bool,
}

impl FakeFactory {
    pub fn new(clipboard: &FakeClipboard, fast_text: bool, native: bool, gui: bool) -> Self {
        FakeFactory {
            clipboard: clipboard.clone(),
            fast_text,
            native,
            gui,
        }
    }

    pub fn all(clipboard: &FakeClipboard) -> Self {
        Self::new(clipboard, true, true, true)
    }
}

impl BackendFactory for FakeFactory {
    fn fast_text(&self) -> Result<Box<dyn FastText>> {
        if !self.fast_text {
            return Err(ClipboardError::BackendUnavailable("fast text library"));
        }
        Ok(Box::new(FakeFastText {
            clipboard: self.clipboard.clone(),
        }))
    }

    fn native(&self) -> Result<Box<dyn ClipboardApi>> {
        if !self.native {
            return Err(ClipboardError::BackendUnavailable("native clipboard API"));
        }
        Ok(Box::new(FakeNative::new(&self.clipboard)))
    }

    fn gui(&self) -> Result<Box<dyn GuiToolkit>> {
        if !self.gui {
            return Err(ClipboardError::BackendUnavailable("gui toolkit"));
        }
        Ok(Box::new(FakeGui {
            clipboard: self.clipboard.clone(),
            pending: String::new(),
        }))
    }
}
