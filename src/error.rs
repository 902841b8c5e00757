use thiserror::Error;

/// Errors reported by the clipboard facade and its backends
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Input handed to a text operation was not text
    #[error("expected UTF-8 text: {0}")]
    InputType(String),

    /// Image input could not be interpreted as a raster image
    #[error("unsupported image input: {0}")]
    UnsupportedImageFormat(String),

    /// No acquired backend can perform the requested operation
    #[error("no clipboard backend available for {0}")]
    BackendUnavailable(&'static str),

    /// A native clipboard call failed mid-sequence
    #[error("native clipboard call {operation} failed: {detail}")]
    NativeApi {
        operation: &'static str,
        detail: String,
    },

    /// Best-effort teardown failed; only ever logged
    #[error("resource cleanup failed: {0}")]
    ResourceCleanup(String),

    /// The manager was closed and accepts no further operations
    #[error("clipboard manager is closed")]
    Closed,
}

impl ClipboardError {
    /// Shorthand for a failed native call
    pub fn native(operation: &'static str, detail: impl Into<String>) -> Self {
        ClipboardError::NativeApi {
            operation,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClipboardError>;
