//! Clipfall - clipboard text and image writer with automatic backend fallback
//!
//! Text goes through the first backend that probed successfully (fast text
//! library, native clipboard API, hidden GUI window). Images are normalized
//! to RGB8 and written through the native API as a device-independent bitmap.

pub mod clipboard;
pub mod error;
pub mod image;
pub mod logging;
pub mod storage;

pub use crate::clipboard::{BackendKind, ClipboardManager};
pub use crate::error::ClipboardError;
pub use crate::image::{CanonicalImage, ImageInput, RawPixels, SampleBuffer};
