//! Error types for the Yomi library.
//!
//! All errors are represented by the [`YomiError`] enum. The variants follow
//! how a failure is handled by the pipeline:
//!
//! - [`YomiError::Configuration`] is fatal when a stage is constructed.
//! - [`YomiError::DictionarySource`] is raised while reloading a user
//!   dictionary. It is logged and carried in a reload outcome, never thrown
//!   into the analysis path.
//! - [`YomiError::Segmentation`] is surfaced to the caller of one session.
//!
//! # Examples
//!
//! ```
//! use yomi::error::{YomiError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(YomiError::configuration("tags_path is not readable"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Yomi operations.
#[derive(Error, Debug)]
pub enum YomiError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or unreadable configuration, fatal at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The user dictionary source vanished, is unreadable, or failed to compile
    #[error("Dictionary source error: {0}")]
    DictionarySource(String),

    /// The morphological analyzer failed on an input
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with YomiError.
pub type Result<T> = std::result::Result<T, YomiError>;

impl YomiError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        YomiError::Configuration(msg.into())
    }

    /// Create a new dictionary source error.
    pub fn dictionary_source<S: Into<String>>(msg: S) -> Self {
        YomiError::DictionarySource(msg.into())
    }

    /// Create a new segmentation error.
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        YomiError::Segmentation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = YomiError::configuration("missing tags file");
        assert_eq!(error.to_string(), "Configuration error: missing tags file");

        let error = YomiError::dictionary_source("userdict.txt: line 3");
        assert_eq!(
            error.to_string(),
            "Dictionary source error: userdict.txt: line 3"
        );

        let error = YomiError::segmentation("out of memory");
        assert_eq!(error.to_string(), "Segmentation error: out of memory");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let yomi_error = YomiError::from(io_error);

        match yomi_error {
            YomiError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
