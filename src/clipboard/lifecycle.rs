use std::fmt;

use super::backend::GuiToolkit;
use crate::error::ClipboardError;

/// Manager lifecycle; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Uninitialized,
    Probing,
    Ready,
    Closed,
}

impl LifecycleState {
    /// Advance to `next`, refusing to move backwards
    pub fn advance(&mut self, next: LifecycleState) -> bool {
        if next <= *self {
            return false;
        }
        log::debug!("Clipboard manager {:?} -> {:?}", self, next);
        *self = next;
        true
    }
}

/// Owned GUI fallback window, released at most once
///
/// Released explicitly through `release()` or implicitly on drop. Teardown
/// errors are logged and discarded.
pub struct GuiHandle {
    toolkit: Option<Box<dyn GuiToolkit>>,
    released: bool,
}

impl GuiHandle {
    pub fn acquired(toolkit: Box<dyn GuiToolkit>) -> Self {
        GuiHandle {
            toolkit: Some(toolkit),
            released: false,
        }
    }

    /// Handle for a manager that never acquired the fallback
    pub fn absent() -> Self {
        GuiHandle {
            toolkit: None,
            released: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.toolkit.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn toolkit_mut(&mut self) -> Option<&mut (dyn GuiToolkit + 'static)> {
        self.toolkit.as_deref_mut()
    }

    /// Destroy the window if still held; returns whether anything was released
    pub fn release(&mut self) -> bool {
        let Some(mut toolkit) = self.toolkit.take() else {
            return false;
        };

        if let Err(e) = toolkit.destroy() {
            let err = ClipboardError::ResourceCleanup(e.to_string());
            log::warn!("Discarding GUI fallback teardown failure: {}", err);
        } else {
            log::debug!("Released GUI fallback window");
        }

        self.released = true;
        true
    }
}

impl Drop for GuiHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for GuiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiHandle")
            .field("available", &self.is_available())
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::backend::BackendFactory;
    use crate::clipboard::testing::{FakeClipboard, FakeFactory};

    fn acquire(clipboard: &FakeClipboard) -> GuiHandle {
        GuiHandle::acquired(FakeFactory::all(clipboard).gui().unwrap())
    }

    #[test]
    fn test_release_is_idempotent() {
        let clipboard = FakeClipboard::new();
        let mut handle = acquire(&clipboard);

        assert!(handle.release());
        assert!(!handle.release());
        assert!(handle.is_released());
        assert_eq!(clipboard.borrow().destroyed, 1);
    }

    #[test]
    fn test_drop_releases_once() {
        let clipboard = FakeClipboard::new();
        let mut handle = acquire(&clipboard);
        handle.release();
        drop(handle);

        assert_eq!(clipboard.borrow().destroyed, 1);

        let handle = acquire(&clipboard);
        drop(handle);
        assert_eq!(clipboard.borrow().destroyed, 2);
    }

    #[test]
    fn test_teardown_failure_is_swallowed() {
        let clipboard = FakeClipboard::new();
        clipboard.borrow_mut().fail_on = Some("destroy");
        let mut handle = acquire(&clipboard);

        assert!(handle.release());
        assert!(!handle.is_available());
    }

    #[test]
    fn test_absent_handle_releases_nothing() {
        let mut handle = GuiHandle::absent();
        assert!(!handle.release());
        assert!(!handle.is_released());
    }

    #[test]
    fn test_state_moves_forward_only() {
        let mut state = LifecycleState::Uninitialized;
        assert!(state.advance(LifecycleState::Probing));
        assert!(state.advance(LifecycleState::Ready));
        assert!(state.advance(LifecycleState::Closed));
        assert!(!state.advance(LifecycleState::Ready));
        assert_eq!(state, LifecycleState::Closed);
    }
}
