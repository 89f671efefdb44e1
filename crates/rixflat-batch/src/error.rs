//! Error types for batch runs

use thiserror::Error;

/// Errors that abort a whole batch
///
/// A single unreadable or malformed document is not a `BatchError`; it is
/// recorded as a `FileFailure` and the batch carries on.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Input directory is missing or unreadable
    #[error("Directory error: {path}: {source}")]
    Directory {
        /// Directory that was requested
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
