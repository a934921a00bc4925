//! Section extractor for theme source files.
//!
//! Pulls the import preamble, the `typography`, `palette` and `shadows`
//! regions and every `<prefix>Name` entry of the `components` table out of a
//! theme definition, and writes each to its own module plus an `index`
//! module re-exporting all of them.
//!
//! Regions are located with a bracket-counting scanner (see [`scanner`]),
//! so component bodies may nest to any depth.

mod render;
mod scanner;
mod sections;

use std::fs;
use std::path::Path;

pub use render::{render_files, render_index, render_module, COMPONENTS_DIR, INDEX_NAME};
pub use scanner::{balanced_end, scan_keys, KeyOccurrence};
pub use sections::{
    extract_preamble, extract_sections, is_component_name, ComponentSection, Region,
    ThemeSections,
};

use crate::config::{validate_max_size, validate_source, ThemeOptions};
use crate::error::Result;
use crate::output::{write_all, OutputFile, SplitReport, WrittenFile};

/// Files to write for one theme source, plus the warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct ThemePlan {
    pub sections: ThemeSections,
    pub files: Vec<OutputFile>,
    pub warnings: Vec<String>,
}

/// Extract and render a theme source without touching the filesystem.
///
/// Component modules above `options.max_size` are kept whole; the size check
/// only records a warning.
#[must_use]
pub fn plan_theme(src: &str, options: &ThemeOptions) -> ThemePlan {
    let sections = extract_sections(src, &options.component_prefix);
    let files = render_files(&sections, &options.extension);
    let mut warnings = Vec::new();

    if sections.is_empty() {
        tracing::warn!("No theme sections found in source");
        warnings.push("No theme sections found in source".to_string());
    }

    for component in &sections.components {
        let path = Path::new(COMPONENTS_DIR)
            .join(format!("{}.{}", component.name, options.extension));
        let Some(file) = files.iter().find(|f| f.relative_path == path) else {
            continue;
        };
        if file.size() > options.max_size {
            tracing::warn!(
                component = %component.name,
                bytes = file.size(),
                max = options.max_size,
                "Component module exceeds size limit, consider splitting it manually"
            );
            warnings.push(format!(
                "{} exceeds {} bytes ({} bytes), consider splitting it manually",
                path.display(),
                options.max_size,
                file.size()
            ));
        }
    }

    ThemePlan {
        sections,
        files,
        warnings,
    }
}

/// Split the theme source named in `options` into modules under
/// `options.output_dir`.
///
/// Fails before producing any output when the source file is missing.
/// `on_written` is called after every file write.
pub fn split_theme<F>(options: &ThemeOptions, on_written: F) -> Result<SplitReport>
where
    F: FnMut(&WrittenFile),
{
    validate_max_size(options.max_size)?;
    validate_source(&options.source)?;

    let src = fs::read_to_string(&options.source)?;
    let plan = plan_theme(&src, options);
    let written = write_all(&options.output_dir, &plan.files, on_written)?;

    Ok(SplitReport {
        written,
        warnings: plan.warnings,
    })
}
