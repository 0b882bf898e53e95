//! Extraction error types
//!
//! Unified error handling for the layout-to-chunk pipeline.

use thiserror::Error;

/// Unified extraction error type
///
/// Every variant carries an owned message so results can be fanned out to
/// coalesced cache waiters via `Clone`.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Upstream layout record is missing required fields or has the wrong shape
    #[error("Malformed structure: {0}")]
    MalformedStructure(String),

    /// Unknown chunk granularity name
    #[error("Invalid granularity: {0} (expected span, line, or block)")]
    InvalidGranularity(String),

    /// Page source failed to produce a layout
    #[error("Page source error: {0}")]
    Source(String),

    /// Word-frequency table could not be loaded
    #[error("Frequency table error: {0}")]
    FrequencyTable(String),

    /// IO error with string message
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::Io(err.to_string())
    }
}
