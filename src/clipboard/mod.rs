pub mod backend;
pub mod fast_text;
pub mod lifecycle;
pub mod manager;
pub mod probe;
pub mod session;
pub mod system;
#[cfg(target_os = "windows")]
pub mod win32;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BackendFactory, BackendKind, ClipboardApi, ClipboardFormat, FastText, GuiToolkit};
pub use lifecycle::{GuiHandle, LifecycleState};
pub use manager::ClipboardManager;
pub use probe::{BackendAvailability, ImageAvailability, TextAvailability};
pub use session::ClipboardSession;
pub use system::SystemBackends;

use crate::storage::Config;

/// Create a clipboard manager for the current host
///
/// Probes every backend enabled in `config`. Never fails: missing backends
/// are recorded as unavailable and logged.
pub fn create_manager(config: &Config) -> ClipboardManager {
    let manager = ClipboardManager::new(config);
    log::info!(
        "Clipboard manager ready (text: {}, images: {})",
        manager
            .text_backend()
            .map(|kind| kind.name())
            .unwrap_or("none"),
        if manager.availability().image.native {
            "native"
        } else {
            "unavailable"
        }
    );
    manager
}
