//! Output files and the per-run report.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A file that a pipeline intends to write, relative to its output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub relative_path: PathBuf,
    pub contents: String,
    /// Number of top-level entries, for token parts.
    pub entries: Option<usize>,
}

impl OutputFile {
    #[must_use]
    pub fn new(relative_path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
            entries: None,
        }
    }

    #[must_use]
    pub fn with_entries(mut self, entries: usize) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Size in bytes of the contents as written.
    #[must_use]
    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

/// A file that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    pub bytes: usize,
    pub entries: Option<usize>,
}

/// Result of one pipeline run: every file written plus non-fatal warnings.
#[derive(Debug, Clone, Default)]
pub struct SplitReport {
    pub written: Vec<WrittenFile>,
    pub warnings: Vec<String>,
}

impl SplitReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a written file by its relative path.
    #[must_use]
    pub fn find(&self, relative_path: impl AsRef<Path>) -> Option<&WrittenFile> {
        let relative_path = relative_path.as_ref();
        self.written.iter().find(|f| f.relative_path == relative_path)
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Write every file under `output_dir`, in order.
///
/// `on_written` is called after each successful write so callers can report
/// progress. The first failing write aborts the run.
pub fn write_all<F>(
    output_dir: &Path,
    files: &[OutputFile],
    mut on_written: F,
) -> Result<Vec<WrittenFile>>
where
    F: FnMut(&WrittenFile),
{
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.relative_path);
        write_atomic(&path, &file.contents)?;
        tracing::debug!(path = %path.display(), bytes = file.size(), "Wrote file");

        let record = WrittenFile {
            relative_path: file.relative_path.clone(),
            bytes: file.size(),
            entries: file.entries,
        };
        on_written(&record);
        written.push(record);
    }
    Ok(written)
}
