//! Error types for the Extractor

use logsift_drain::DrainError;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The pattern oracle failed during training or selection
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// The oracle reported no class for a chunk while asked to always resolve
    #[error("Oracle resolved no class for chunk at line {line}")]
    Unmatched {
        /// Line the unresolved chunk starts on
        line: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DrainError> for ExtractorError {
    fn from(e: DrainError) -> Self {
        match e {
            DrainError::InvalidConfig(msg) => ExtractorError::Config(msg),
            other => ExtractorError::Oracle(other.to_string()),
        }
    }
}
