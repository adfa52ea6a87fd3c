//! Error types for frame operations.

use thiserror::Error;

/// Error reported by a platform implementation (DOM call failed, node missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// A host stylesheet whose rules could not be read.
///
/// Expected for cross-origin sheets; the scan counts these and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("stylesheet rules are not accessible: {reason}")]
pub struct SheetAccessError {
    pub reason: String,
}

impl SheetAccessError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while hosting content in a nested frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameError {
    /// An event type outside the bridged set reached the bridge.
    #[error("unsupported event type for bridging: {0}")]
    UnsupportedEvent(String),

    /// DOM operation failed.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The frame has been unmounted.
    #[error("frame is not mounted")]
    NotMounted,

    /// Configuration could not be applied.
    #[error("invalid frame configuration: {0}")]
    InvalidConfig(String),
}
