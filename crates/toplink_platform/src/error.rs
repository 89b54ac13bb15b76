//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No global `window` (not running in a browser main thread)
    #[error("No window available")]
    NoWindow,

    /// Window has no document
    #[error("No document available")]
    NoDocument,

    /// Failed to attach an event listener
    #[error("Failed to subscribe to {event} on {target}: {reason}")]
    Listener {
        event: &'static str,
        target: String,
        reason: String,
    },

    /// Failed to request an animation frame
    #[error("Animation frame request failed: {0}")]
    FrameRequest(String),

    /// Failed to write presentation state to an element
    #[error("Failed to update element #{id}: {reason}")]
    ElementUpdate { id: String, reason: String },

    /// A widget is already mounted on this page
    #[error("Widget already mounted on this page")]
    AlreadyMounted,
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
