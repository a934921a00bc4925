//! Error types for the splitter.
//!
//! Only fatal conditions are errors. Irregularities that the pipelines can
//! work around (missing regions, oversized entries) are collected as
//! warnings in [`crate::output::SplitReport`] instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Source file does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Size bound of zero bytes.
    #[error("Invalid maximum size: {0}. Expected a positive number of bytes")]
    InvalidMaxSize(usize),

    /// Custom category table is unusable.
    #[error("Invalid category table: {0}")]
    InvalidCategoryTable(String),

    /// Token document is not valid JSON.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Token document parsed but its top level is not an object.
    #[error("Expected a JSON object at the top level of the token document, found {0}")]
    NotAnObject(&'static str),

    /// Category table file is not valid YAML.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
