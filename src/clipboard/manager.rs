use std::fmt;

use super::backend::{BackendFactory, BackendKind, ClipboardApi, FastText, GuiToolkit};
use super::lifecycle::{GuiHandle, LifecycleState};
use super::probe::{self, BackendAvailability};
use super::session;
use super::system::SystemBackends;
use crate::error::{ClipboardError, Result};
use crate::image::{self, ImageInput, ImageNormalizer};
use crate::storage::{BackendConfig, Config};

/// Clipboard facade: text and images with automatic backend fallback
///
/// Backends are probed once at construction. Text operations always use the
/// highest-priority backend that probed successfully and never fall further
/// down the chain at call time. Images go through the native API only.
///
/// Not shareable across threads; wrap calls in a lock if one instance must
/// serve several callers.
pub struct ClipboardManager {
    state: LifecycleState,
    availability: BackendAvailability,
    fast_text: Option<Box<dyn FastText>>,
    native: Option<Box<dyn ClipboardApi>>,
    gui: GuiHandle,
    normalizer: ImageNormalizer,
}

impl ClipboardManager {
    /// Probe the host's backends using the given configuration
    pub fn new(config: &Config) -> Self {
        Self::with_factory(
            &SystemBackends,
            &config.backends,
            image::create_normalizer(&config.general),
        )
    }

    /// Probe backends from `factory`
    pub fn with_factory(
        factory: &dyn BackendFactory,
        backends: &BackendConfig,
        normalizer: ImageNormalizer,
    ) -> Self {
        let mut state = LifecycleState::Uninitialized;
        state.advance(LifecycleState::Probing);

        let probed = probe::probe(factory, backends);

        state.advance(LifecycleState::Ready);
        ClipboardManager {
            state,
            availability: probed.availability,
            fast_text: probed.fast_text,
            native: probed.native,
            gui: probed.gui,
            normalizer,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn availability(&self) -> BackendAvailability {
        self.availability
    }

    /// Backend every text operation will use, if any
    pub fn text_backend(&self) -> Option<BackendKind> {
        self.availability.text_backend()
    }

    /// Replace the clipboard with `text`, returning the backend that served it
    ///
    /// Text containing NUL is rejected: clipboard text is NUL-terminated and
    /// would not read back intact.
    pub fn save_text(&mut self, text: &str) -> Result<BackendKind> {
        self.ensure_ready("save_text")?;

        if let Some(offset) = text.find('\0') {
            let err = ClipboardError::InputType(format!("text contains NUL at byte {}", offset));
            log::error!("save_text rejected input: {}", err);
            return Err(err);
        }

        let kind = self.require_text_backend("save_text")?;
        let result = match kind {
            BackendKind::FastText => self.fast_text_backend()?.copy(text),
            BackendKind::Native => session::write_text(self.native_backend()?, text),
            BackendKind::Gui => {
                let gui = self.gui_backend()?;
                gui.clipboard_clear().and_then(|_| gui.clipboard_append(text))
            }
        };

        match result {
            Ok(()) => {
                log::debug!("Saved {} bytes text via {}", text.len(), kind);
                Ok(kind)
            }
            Err(e) => {
                log::error!("save_text via {} failed: {}", kind, e);
                Err(e)
            }
        }
    }

    /// Like `save_text`, for untyped input; anything but UTF-8 is rejected
    /// before touching the clipboard
    pub fn save_text_bytes(&mut self, bytes: &[u8]) -> Result<BackendKind> {
        self.ensure_ready("save_text")?;

        let text = std::str::from_utf8(bytes).map_err(|e| {
            let err = ClipboardError::InputType(e.to_string());
            log::error!("save_text rejected input: {}", err);
            err
        })?;

        self.save_text(text)
    }

    /// Clipboard text, or `None` when the clipboard holds no text
    pub fn get_text(&mut self) -> Result<Option<String>> {
        self.ensure_ready("get_text")?;

        let Some(kind) = self.text_backend() else {
            log::warn!("get_text: no text backend available");
            return Ok(None);
        };

        let result = match kind {
            BackendKind::FastText => self.fast_text_backend()?.paste(),
            BackendKind::Native => session::read_text(self.native_backend()?),
            BackendKind::Gui => match self.gui_backend()?.clipboard_get() {
                Ok(text) => Ok(text),
                Err(e) => {
                    log::debug!("gui clipboard_get returned nothing: {}", e);
                    Ok(None)
                }
            },
        };

        result.inspect_err(|e| log::error!("get_text via {} failed: {}", kind, e))
    }

    /// Replace the clipboard with an image, written as CF_DIB
    pub fn save_image(&mut self, input: impl Into<ImageInput>) -> Result<()> {
        self.ensure_ready("save_image")?;

        let canonical = self
            .normalizer
            .normalize(input.into())
            .inspect_err(|e| log::error!("save_image: {}", e))?;

        if !self.availability.image.native {
            let err = ClipboardError::BackendUnavailable("image");
            log::error!("save_image: {}", err);
            return Err(err);
        }

        let dib = image::encode_dib(&canonical).inspect_err(|e| log::error!("save_image: {}", e))?;
        session::write_dib(self.native_backend()?, &dib)
            .inspect_err(|e| log::error!("save_image via native failed: {}", e))?;

        log::info!(
            "Copied {}x{} image to clipboard ({} byte DIB)",
            canonical.width(),
            canonical.height(),
            dib.len()
        );
        Ok(())
    }

    /// Empty the clipboard, or write empty text when the native API is missing
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_ready("clear")?;

        if let Some(native) = self.native.as_deref_mut() {
            return session::empty(native)
                .inspect_err(|e| log::error!("clear via native failed: {}", e));
        }

        log::debug!("clear: native API unavailable, writing empty text");
        self.save_text("").map(|_| ())
    }

    /// Release the GUI fallback and refuse further operations; idempotent
    pub fn close(&mut self) {
        if self.state == LifecycleState::Closed {
            log::debug!("close: clipboard manager already closed");
            return;
        }

        self.gui.release();
        self.state.advance(LifecycleState::Closed);
    }

    fn ensure_ready(&self, operation: &str) -> Result<()> {
        if self.state != LifecycleState::Ready {
            log::warn!("{} called on a {:?} clipboard manager", operation, self.state);
            return Err(ClipboardError::Closed);
        }
        Ok(())
    }

    fn require_text_backend(&self, operation: &str) -> Result<BackendKind> {
        self.text_backend().ok_or_else(|| {
            let err = ClipboardError::BackendUnavailable("text");
            log::error!("{}: {}", operation, err);
            err
        })
    }

    fn fast_text_backend(&mut self) -> Result<&mut (dyn FastText + 'static)> {
        self.fast_text
            .as_deref_mut()
            .ok_or(ClipboardError::BackendUnavailable("fast text library"))
    }

    fn native_backend(&mut self) -> Result<&mut (dyn ClipboardApi + 'static)> {
        self.native
            .as_deref_mut()
            .ok_or(ClipboardError::BackendUnavailable("native clipboard API"))
    }

    fn gui_backend(&mut self) -> Result<&mut (dyn GuiToolkit + 'static)> {
        self.gui
            .toolkit_mut()
            .ok_or(ClipboardError::BackendUnavailable("gui toolkit"))
    }
}

impl Drop for ClipboardManager {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for ClipboardManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardManager")
            .field("state", &self.state)
            .field("availability", &self.availability)
            .field("gui", &self.gui)
            .finish()
    }
}
