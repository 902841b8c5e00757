use super::backend::{BackendFactory, ClipboardApi, FastText, GuiToolkit};
use super::fast_text::ArboardText;
use crate::error::Result;

/// Backends provided by the host OS
///
/// The native API and the GUI fallback exist only on Windows; elsewhere
/// they probe as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackends;

impl BackendFactory for SystemBackends {
    fn fast_text(&self) -> Result<Box<dyn FastText>> {
        Ok(Box::new(ArboardText::new()?))
    }

    fn native(&self) -> Result<Box<dyn ClipboardApi>> {
        #[cfg(target_os = "windows")]
        {
            Ok(Box::new(super::win32::Win32Clipboard::new()))
        }

        #[cfg(not(target_os = "windows"))]
        {
            Err(crate::error::ClipboardError::BackendUnavailable(
                "native clipboard API (Windows only)",
            ))
        }
    }

    fn gui(&self) -> Result<Box<dyn GuiToolkit>> {
        #[cfg(target_os = "windows")]
        {
            Ok(Box::new(super::win32::HiddenWindow::create()?))
        }

        #[cfg(not(target_os = "windows"))]
        {
            Err(crate::error::ClipboardError::BackendUnavailable(
                "gui toolkit window (Windows only)",
            ))
        }
    }
}
