//! Error types for the staring contest library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Eye landmark geometry collapsed (zero horizontal span); the frame
    /// carries no decision and must be skipped, not treated as a blink
    #[error("degenerate eye geometry: horizontal eye span is zero")]
    DegenerateGeometry,

    /// No camera or frame source available; fatal to starting a round
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// Display name already present on the leaderboard, detected before the round
    #[error("duplicate identity: username '{0}' is already taken")]
    DuplicateIdentity(String),

    /// Uniqueness violation detected at write time by the store
    #[error("leaderboard conflict: a record for '{0}' already exists")]
    Conflict(String),

    /// Landmark set has the wrong shape (point count, eye region bounds)
    #[error("invalid landmarks: {0}")]
    InvalidLandmarks(String),

    /// Session state machine was driven out of order
    #[error("invalid session transition: {0}")]
    InvalidTransition(String),

    /// Leaderboard store operation failed
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
