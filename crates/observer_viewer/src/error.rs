//! Startup error types for the viewer.

use observer_core::error::ParseError;
use thiserror::Error;

/// Errors that prevent the viewer from starting playback.
///
/// All variants are fatal: the app window is never opened from a failed
/// load, so no partial match record ever reaches the renderer.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// No observer log path was supplied on the command line.
    #[error("no observer log file specified")]
    MissingLogPath,

    /// The log file could not be read.
    #[error("failed to read observer log '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The log file was read but is malformed.
    #[error("malformed observer log: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for viewer startup operations.
pub type Result<T> = std::result::Result<T, ObserverError>;
