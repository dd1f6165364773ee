//! Error types for cube-sphere surface generation

use thiserror::Error;

/// Errors that can occur during mesh building, texture synthesis or regeneration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Generated buffers broke an internal invariant (builder bug, not recoverable)
    #[error("consistency violation: {0}")]
    Consistency(String),
    /// A regeneration was requested while a restart is still in progress
    #[error("regeneration already pending")]
    RegenerationPending,
}

/// Result type alias for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;
