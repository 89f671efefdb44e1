//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while parsing a document
///
/// Field-level absence is never an error; only a document that cannot be
/// read or is not well-formed markup fails.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input is not well-formed markup
    #[error("Malformed markup: {0}")]
    Structural(String),

    /// Document exceeds the configured size limit
    #[error("Document too large: {0} bytes (max: {1})")]
    DocumentTooLarge(usize, usize),

    /// Document bytes are not valid UTF-8
    #[error("Invalid encoding: {0}")]
    Encoding(String),

    /// Document could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether this is a structural parse failure
    pub fn is_structural(&self) -> bool {
        matches!(self, ExtractorError::Structural(_))
    }

    /// Short failure category for metrics and reports
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractorError::Structural(_) => "structural",
            ExtractorError::DocumentTooLarge(..) => "too_large",
            ExtractorError::Encoding(_) => "encoding",
            ExtractorError::Io(_) => "io",
            ExtractorError::Config(_) => "config",
        }
    }
}

impl From<quick_xml::Error> for ExtractorError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractorError::Structural(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ExtractorError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ExtractorError::Encoding(e.to_string())
    }
}
