//! Rendering of extracted sections into module files.

use std::path::PathBuf;

use super::sections::{Region, ThemeSections};
use crate::output::OutputFile;

/// Directory holding one module per component.
pub const COMPONENTS_DIR: &str = "Components";

/// Base name of the aggregator module.
pub const INDEX_NAME: &str = "index";

/// Build the text of one module exporting `symbol`.
///
/// The preamble, when present, is separated from the export by a blank line.
#[must_use]
pub fn render_module(preamble: &str, symbol: &str, content: &str) -> String {
    let export = format!("export const {symbol} = {content};\n");
    if preamble.is_empty() {
        export
    } else {
        format!("{preamble}\n\n{export}")
    }
}

fn region_path(region: Region, extension: &str) -> PathBuf {
    PathBuf::from(region.dir_name()).join(format!("{}.{extension}", region.key()))
}

fn component_path(name: &str, extension: &str) -> PathBuf {
    PathBuf::from(COMPONENTS_DIR).join(format!("{name}.{extension}"))
}

/// Render the aggregator re-exporting every module that will be written.
///
/// Regions come first (typography, palette, shadows), then components in
/// discovery order. Regions that were not found are not referenced.
#[must_use]
pub fn render_index(sections: &ThemeSections) -> String {
    let region_lines: Vec<String> = Region::ALL
        .iter()
        .filter(|r| sections.region(**r).is_some())
        .map(|r| {
            format!(
                "export {{ {key} }} from './{dir}/{key}';",
                key = r.key(),
                dir = r.dir_name()
            )
        })
        .collect();

    let component_lines: Vec<String> = sections
        .components
        .iter()
        .map(|c| format!("export {{ {name} }} from './{COMPONENTS_DIR}/{name}';", name = c.name))
        .collect();

    let mut blocks = Vec::new();
    if !region_lines.is_empty() {
        blocks.push(region_lines.join("\n"));
    }
    if !component_lines.is_empty() {
        blocks.push(format!("// Components\n{}", component_lines.join("\n")));
    }

    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join("\n\n"))
    }
}

/// Render every output file: region modules, component modules, then the index.
#[must_use]
pub fn render_files(sections: &ThemeSections, extension: &str) -> Vec<OutputFile> {
    let mut files = Vec::new();

    for region in Region::ALL {
        let Some(content) = sections.region(region) else {
            continue;
        };
        let preamble = if region.uses_preamble() {
            sections.preamble.as_str()
        } else {
            ""
        };
        files.push(OutputFile::new(
            region_path(region, extension),
            render_module(preamble, region.key(), content),
        ));
    }

    for component in &sections.components {
        files.push(OutputFile::new(
            component_path(&component.name, extension),
            render_module(&sections.preamble, &component.name, &component.content),
        ));
    }

    files.push(OutputFile::new(
        format!("{INDEX_NAME}.{extension}"),
        render_index(sections),
    ));

    files
}
