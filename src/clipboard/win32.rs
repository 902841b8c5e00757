//! Win32 clipboard primitives and the hidden-window fallback
//!
//! Every helper here is a thin wrapper over one user32/kernel32 call. The
//! open/close pairing lives in `ClipboardSession`, never here.

use std::ffi::c_void;
use std::ptr::copy_nonoverlapping;

use windows::Win32::Foundation::{GlobalFree, HANDLE, HGLOBAL, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, GetClipboardData, IsClipboardFormatAvailable, OpenClipboard,
    SetClipboardData,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalLock, GlobalSize, GlobalUnlock};
use windows::Win32::System::Ole::{CF_DIB, CF_UNICODETEXT};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, SW_HIDE, ShowWindow, WINDOW_EX_STYLE, WS_OVERLAPPED,
};
use windows::core::w;

use super::backend::{ClipboardApi, ClipboardFormat, GuiToolkit};
use super::session;
use crate::error::{ClipboardError, Result};

fn format_id(format: ClipboardFormat) -> u32 {
    match format {
        ClipboardFormat::UnicodeText => CF_UNICODETEXT.0 as u32,
        ClipboardFormat::Dib => CF_DIB.0 as u32,
    }
}

/// Native clipboard through user32
#[derive(Debug, Default)]
pub struct Win32Clipboard {
    owner: Option<HWND>,
}

impl Win32Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard opened on behalf of `owner`, which becomes the clipboard owner on empty
    fn owned_by(owner: HWND) -> Self {
        Win32Clipboard { owner: Some(owner) }
    }
}

impl ClipboardApi for Win32Clipboard {
    fn open(&mut self) -> Result<()> {
        unsafe { OpenClipboard(self.owner) }
            .map_err(|e| ClipboardError::native("OpenClipboard", e.to_string()))
    }

    fn empty(&mut self) -> Result<()> {
        unsafe { EmptyClipboard() }
            .map_err(|e| ClipboardError::native("EmptyClipboard", e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let bytes = unsafe {
            std::slice::from_raw_parts(wide.as_ptr() as *const u8, std::mem::size_of_val(wide.as_slice()))
        };
        unsafe { set_global_data(format_id(ClipboardFormat::UnicodeText), bytes) }
    }

    fn get_text(&mut self) -> Result<Option<String>> {
        let handle = unsafe { GetClipboardData(format_id(ClipboardFormat::UnicodeText)) }
            .map_err(|e| ClipboardError::native("GetClipboardData", e.to_string()))?;
        if handle.is_invalid() {
            return Ok(None);
        }

        let hglobal = HGLOBAL(handle.0);
        unsafe {
            let ptr = GlobalLock(hglobal) as *const u16;
            if ptr.is_null() {
                return Err(ClipboardError::native("GlobalLock", "null pointer"));
            }

            let units = std::slice::from_raw_parts(ptr, GlobalSize(hglobal) / 2);
            let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
            let text = String::from_utf16_lossy(&units[..end]);
            let _ = GlobalUnlock(hglobal);
            Ok(Some(text))
        }
    }

    fn set_dib(&mut self, dib: &[u8]) -> Result<()> {
        unsafe { set_global_data(format_id(ClipboardFormat::Dib), dib) }
    }

    fn is_format_available(&self, format: ClipboardFormat) -> bool {
        unsafe { IsClipboardFormatAvailable(format_id(format)) }.is_ok()
    }

    fn close(&mut self) -> Result<()> {
        unsafe { CloseClipboard() }
            .map_err(|e| ClipboardError::native("CloseClipboard", e.to_string()))
    }
}

/// Copy bytes into movable global memory and hand it to the clipboard
///
/// On success the clipboard owns the allocation.
unsafe fn set_global_data(format: u32, data: &[u8]) -> Result<()> {
    let hglobal = unsafe { GlobalAlloc(GMEM_MOVEABLE, data.len()) }
        .map_err(|e| ClipboardError::native("GlobalAlloc", e.to_string()))?;

    let ptr = unsafe { GlobalLock(hglobal) } as *mut u8;
    if ptr.is_null() {
        let _ = unsafe { GlobalFree(Some(hglobal)) };
        return Err(ClipboardError::native("GlobalLock", "null pointer"));
    }

    unsafe {
        copy_nonoverlapping(data.as_ptr(), ptr, data.len());
        let _ = GlobalUnlock(hglobal);
    }

    if let Err(e) = unsafe { SetClipboardData(format, Some(HANDLE(hglobal.0))) } {
        let _ = unsafe { GlobalFree(Some(hglobal)) };
        return Err(ClipboardError::native("SetClipboardData", e.to_string()));
    }

    Ok(())
}

/// Hidden top-level window that owns the clipboard for the GUI fallback
pub struct HiddenWindow {
    hwnd: HWND,
    clipboard: Win32Clipboard,
    pending: String,
}

impl HiddenWindow {
    pub fn create() -> Result<Self> {
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                w!("clipfall"),
                WS_OVERLAPPED,
                0,
                0,
                0,
                0,
                None,
                None,
                None,
                None::<*const c_void>,
            )
        }
        .map_err(|e| ClipboardError::native("CreateWindowExW", e.to_string()))?;

        unsafe {
            let _ = ShowWindow(hwnd, SW_HIDE);
        }

        log::debug!("Created hidden clipboard window {:?}", hwnd);
        Ok(HiddenWindow {
            hwnd,
            clipboard: Win32Clipboard::owned_by(hwnd),
            pending: String::new(),
        })
    }
}

impl GuiToolkit for HiddenWindow {
    fn clipboard_clear(&mut self) -> Result<()> {
        self.pending.clear();
        session::empty(&mut self.clipboard)
    }

    fn clipboard_append(&mut self, text: &str) -> Result<()> {
        self.pending.push_str(text);
        session::write_text(&mut self.clipboard, &self.pending)
    }

    fn clipboard_get(&mut self) -> Result<Option<String>> {
        session::read_text(&mut self.clipboard)
    }

    fn destroy(&mut self) -> Result<()> {
        unsafe { DestroyWindow(self.hwnd) }
            .map_err(|e| ClipboardError::ResourceCleanup(format!("DestroyWindow: {}", e)))
    }
}
