//! Theme splitter - split oversized theme and design-token sources.
//!
//! Bundlers that choke on one very large theme module or token dictionary
//! can consume many small files instead. Two independent pipelines do the
//! splitting:
//!
//! - [`theme`]: extracts the import preamble, `typography`, `palette`,
//!   `shadows` and every component entry from a theme definition and writes
//!   each to its own module, plus an `index` module re-exporting them.
//! - [`tokens`]: assigns every top-level key of a JSON token dictionary to a
//!   category file and packs oversized categories into size-bounded parts.
//!
//! # Example
//!
//! ```
//! use theme_splitter::tokens::{parse_token_document, partition_tokens, CategoryTable};
//!
//! let doc = parse_token_document(r#"{"spacingUnit": 8, "zIndexModal": 1200}"#).unwrap();
//! let plan = partition_tokens(&doc, &CategoryTable::default(), 10 * 1024).unwrap();
//!
//! let names: Vec<&str> = plan.parts.iter().map(|p| p.file_name.as_str()).collect();
//! assert_eq!(names, ["Spacing.json", "ZIndex.json"]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults, pipeline options and validation
//! - [`error`]: Error types and Result alias
//! - [`output`]: Atomic file writes and the per-run report
//! - [`theme`]: Section extractor
//! - [`tokens`]: Token partitioner
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod theme;
pub mod tokens;

// Re-export main functions
pub use theme::split_theme;
pub use tokens::split_tokens;

// Re-export commonly used items
pub use config::{ThemeOptions, TokenOptions};
pub use error::{Result, SplitterError};
pub use output::{SplitReport, WrittenFile};
