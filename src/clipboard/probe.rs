use serde::Serialize;

use super::backend::{BackendFactory, BackendKind, ClipboardApi, FastText};
use super::lifecycle::GuiHandle;
use crate::storage::BackendConfig;

/// Text backends that probed successfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextAvailability {
    pub fast_text: bool,
    pub native: bool,
    pub gui: bool,
}

/// Image backends that probed successfully (native only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageAvailability {
    pub native: bool,
}

/// Probe result, fixed for the lifetime of a manager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackendAvailability {
    pub text: TextAvailability,
    pub image: ImageAvailability,
}

impl BackendAvailability {
    /// Text backends from highest to lowest priority
    pub const TEXT_PRIORITY: [BackendKind; 3] =
        [BackendKind::FastText, BackendKind::Native, BackendKind::Gui];

    pub fn has_text(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::FastText => self.text.fast_text,
            BackendKind::Native => self.text.native,
            BackendKind::Gui => self.text.gui,
        }
    }

    /// Highest-priority text backend that was acquired
    pub fn text_backend(&self) -> Option<BackendKind> {
        Self::TEXT_PRIORITY
            .into_iter()
            .find(|kind| self.has_text(*kind))
    }
}

/// Backends acquired by one probing pass
pub struct ProbedBackends {
    pub availability: BackendAvailability,
    pub fast_text: Option<Box<dyn FastText>>,
    pub native: Option<Box<dyn ClipboardApi>>,
    pub gui: GuiHandle,
}

/// Acquire every enabled backend once, in priority order
///
/// Failures are recorded as unavailable and never retried. The native API is
/// acquired once and serves both text and images.
pub fn probe(factory: &dyn BackendFactory, config: &BackendConfig) -> ProbedBackends {
    let fast_text = acquire(BackendKind::FastText, config.fast_text, || factory.fast_text());
    let native = acquire(BackendKind::Native, config.native, || factory.native());
    let gui = acquire(BackendKind::Gui, config.gui, || factory.gui());

    let availability = BackendAvailability {
        text: TextAvailability {
            fast_text: fast_text.is_some(),
            native: native.is_some(),
            gui: gui.is_some(),
        },
        image: ImageAvailability {
            native: native.is_some(),
        },
    };

    match availability.text_backend() {
        Some(kind) => log::info!("Text clipboard backend: {}", kind),
        None => log::warn!("No text clipboard backend available"),
    }
    if !availability.image.native {
        log::warn!("Native clipboard API unavailable, images cannot be copied");
    }

    ProbedBackends {
        availability,
        fast_text,
        native,
        gui: gui.map(GuiHandle::acquired).unwrap_or_else(GuiHandle::absent),
    }
}

fn acquire<T>(
    kind: BackendKind,
    enabled: bool,
    attempt: impl FnOnce() -> crate::error::Result<T>,
) -> Option<T> {
    if !enabled {
        log::debug!("Backend {} disabled in configuration", kind);
        return None;
    }

    match attempt() {
        Ok(backend) => {
            log::debug!("Backend {} acquired", kind);
            Some(backend)
        }
        Err(e) => {
            log::warn!("Backend {} unavailable: {}", kind, e);
            None
        }
    }
}
