//! Configuration constants, pipeline options and validation functions.

use std::path::{Path, PathBuf};

use crate::error::{Result, SplitterError};

/// Default maximum size of a single output file in bytes (10 KiB).
///
/// Measured on the exact bytes written, which for token files means the
/// two-space indented JSON serialization.
pub const DEFAULT_MAX_SIZE: usize = 10 * 1024;

/// Default theme source file.
pub const DEFAULT_THEME_SOURCE: &str = "source/base/baseTheme.ts";

/// Default output directory for the theme split.
pub const DEFAULT_THEME_OUTPUT: &str = "baseTheme";

/// Default token source file.
pub const DEFAULT_TOKENS_SOURCE: &str = "source/Tokens.json";

/// Default output directory for the token split.
pub const DEFAULT_TOKENS_OUTPUT: &str = "Tokens";

/// Identifier prefix that marks a component entry (e.g. `MuiButton`).
pub const DEFAULT_COMPONENT_PREFIX: &str = "Mui";

/// File extension for the generated theme modules.
pub const DEFAULT_THEME_EXTENSION: &str = "ts";

/// Options for the theme section extractor.
#[derive(Debug, Clone)]
pub struct ThemeOptions {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub max_size: usize,
    pub component_prefix: String,
    pub extension: String,
}

impl ThemeOptions {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            max_size: DEFAULT_MAX_SIZE,
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
            extension: DEFAULT_THEME_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_component_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.component_prefix = prefix.into();
        self
    }

    /// Set the output extension. A leading dot is ignored.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_THEME_SOURCE, DEFAULT_THEME_OUTPUT)
    }
}

/// Options for the token partitioner.
#[derive(Debug, Clone)]
pub struct TokenOptions {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub max_size: usize,
    /// Optional JSON or YAML file overriding the built-in category table.
    pub categories: Option<PathBuf>,
}

impl TokenOptions {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            max_size: DEFAULT_MAX_SIZE,
            categories: None,
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_categories(mut self, path: impl Into<PathBuf>) -> Self {
        self.categories = Some(path.into());
        self
    }
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS_SOURCE, DEFAULT_TOKENS_OUTPUT)
    }
}

/// Validate the size bound.
///
/// # Examples
/// ```
/// use theme_splitter::config::validate_max_size;
///
/// assert!(validate_max_size(10 * 1024).is_ok());
/// assert!(validate_max_size(0).is_err());
/// ```
pub fn validate_max_size(max_size: usize) -> Result<()> {
    if max_size == 0 {
        return Err(SplitterError::InvalidMaxSize(max_size));
    }
    Ok(())
}

/// Check that the source file exists before anything is read or written.
pub fn validate_source(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SplitterError::SourceNotFound(path.to_path_buf()))
    }
}
