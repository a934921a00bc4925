//! Token partitioner for JSON design-token dictionaries.
//!
//! Every top-level key is assigned to a category file by an ordered
//! [`CategoryTable`]. Categories whose serialized form exceeds the size bound
//! are greedily packed into `<Category>-part-<n>.json` files.

mod category;
mod packer;

use std::fs;

use serde_json::{Map, Value};

pub use category::{Bucket, CategoryRule, CategoryTable, DEFAULT_FALLBACK};
pub use packer::{pack_entries, part_file_name, serialized_size, split_bucket, PackedGroup, Part};

use crate::config::{validate_max_size, validate_source, TokenOptions};
use crate::error::{Result, SplitterError};
use crate::output::{write_all, OutputFile, SplitReport, WrittenFile};

/// Parts to write for one token document, plus the warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct TokenPlan {
    pub parts: Vec<Part>,
    pub warnings: Vec<String>,
}

impl TokenPlan {
    /// Render every part as two-space indented JSON.
    pub fn to_files(&self) -> Result<Vec<OutputFile>> {
        self.parts
            .iter()
            .map(|part| -> Result<OutputFile> {
                let contents = serde_json::to_string_pretty(&part.entries)?;
                Ok(OutputFile::new(&part.file_name, contents).with_entries(part.entries.len()))
            })
            .collect()
    }
}

/// Parse a token document, requiring an object at the top level.
///
/// Key order of the source is preserved.
pub fn parse_token_document(src: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(src)? {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(SplitterError::NotAnObject("an array")),
        Value::String(_) => Err(SplitterError::NotAnObject("a string")),
        Value::Number(_) => Err(SplitterError::NotAnObject("a number")),
        Value::Bool(_) => Err(SplitterError::NotAnObject("a boolean")),
        Value::Null => Err(SplitterError::NotAnObject("null")),
    }
}

/// Categorize and pack a token document without touching the filesystem.
///
/// Every top-level key ends up in exactly one part.
pub fn partition_tokens(
    document: &Map<String, Value>,
    table: &CategoryTable,
    max_size: usize,
) -> Result<TokenPlan> {
    let mut plan = TokenPlan::default();
    for bucket in table.categorize(document) {
        let (parts, warnings) = split_bucket(&bucket, max_size)?;
        plan.parts.extend(parts);
        plan.warnings.extend(warnings);
    }
    Ok(plan)
}

/// Split the token document named in `options` into category files under
/// `options.output_dir`.
///
/// A missing source, malformed JSON or an unusable category table aborts the
/// run before any file is written. `on_written` is called after every write.
pub fn split_tokens<F>(options: &TokenOptions, on_written: F) -> Result<SplitReport>
where
    F: FnMut(&WrittenFile),
{
    validate_max_size(options.max_size)?;
    validate_source(&options.source)?;

    let table = match &options.categories {
        Some(path) => CategoryTable::load(path)?,
        None => CategoryTable::default(),
    };

    let src = fs::read_to_string(&options.source)?;
    let document = parse_token_document(&src)?;
    let plan = partition_tokens(&document, &table, options.max_size)?;
    let files = plan.to_files()?;
    let written = write_all(&options.output_dir, &files, on_written)?;

    Ok(SplitReport {
        written,
        warnings: plan.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn large_document() -> Map<String, Value> {
        let mut doc = Map::new();
        for i in 0..40 {
            doc.insert(format!("palette{i}"), json!({ "main": "c".repeat(400) }));
        }
        for i in 0..5 {
            doc.insert(format!("spacing{i}"), json!(i * 4));
        }
        doc.insert("hugeShadows".to_string(), json!("s".repeat(12 * 1024)));
        doc.insert("motion".to_string(), json!({ "fast": 100 }));
        doc
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_token_document("[1, 2]"),
            Err(SplitterError::NotAnObject("an array"))
        ));
        assert!(matches!(
            parse_token_document("{ nope"),
            Err(SplitterError::Json(_))
        ));
    }

    #[test]
    fn test_parse_preserves_order() {
        let doc = parse_token_document(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_partition_example_scenario() {
        let doc = parse_token_document(
            r##"{"primaryColor": "#fff", "spacingUnit": 8, "zIndexModal": 1200}"##,
        )
        .unwrap();
        let plan = partition_tokens(&doc, &CategoryTable::default(), 10 * 1024).unwrap();

        let names: Vec<&str> = plan.parts.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["Palette.json", "Spacing.json", "ZIndex.json"]);
        assert!(plan.parts.iter().all(|p| p.entries.len() == 1));
        assert!(plan.parts[0].entries.contains_key("primaryColor"));
    }

    #[test]
    fn test_partition_covers_every_key_once() {
        let doc = large_document();
        let plan = partition_tokens(&doc, &CategoryTable::default(), 10 * 1024).unwrap();

        let mut seen = HashSet::new();
        for part in &plan.parts {
            for key in part.entries.keys() {
                assert!(seen.insert(key.clone()), "duplicate key {key}");
            }
        }
        let expected: HashSet<String> = doc.keys().cloned().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_partition_soft_size_bound() {
        let max = 10 * 1024;
        let plan = partition_tokens(&large_document(), &CategoryTable::default(), max).unwrap();

        for part in &plan.parts {
            let size = serialized_size(&part.entries).unwrap();
            assert!(
                size <= max || part.entries.len() == 1,
                "{} is {size} bytes with {} entries",
                part.file_name,
                part.entries.len()
            );
        }
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("hugeShadows"));
    }

    #[test]
    fn test_partition_names_split_parts() {
        let plan =
            partition_tokens(&large_document(), &CategoryTable::default(), 10 * 1024).unwrap();
        let names: Vec<&str> = plan.parts.iter().map(|p| p.file_name.as_str()).collect();

        // 40 palette entries of ~440 bytes need two parts
        assert_eq!(
            names,
            vec![
                "Palette-part-1.json",
                "Palette-part-2.json",
                "Spacing.json",
                "Shadows.json",
                "Misc.json",
            ]
        );

        // Document order is kept across the palette parts
        let palette_keys: Vec<String> = plan.parts[..2]
            .iter()
            .flat_map(|p| p.entries.keys().cloned())
            .collect();
        let expected: Vec<String> = (0..40).map(|i| format!("palette{i}")).collect();
        assert_eq!(palette_keys, expected);
    }

    #[test]
    fn test_to_files_renders_pretty_json() {
        let doc = parse_token_document(r#"{"spacingUnit": 8}"#).unwrap();
        let plan = partition_tokens(&doc, &CategoryTable::default(), 1024).unwrap();
        let files = plan.to_files().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, PathBuf::from("Spacing.json"));
        assert_eq!(files[0].contents, "{\n  \"spacingUnit\": 8\n}");
        assert_eq!(files[0].entries, Some(1));
    }

    #[test]
    fn test_split_tokens_malformed_json_writes_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Tokens.json");
        fs::write(&source, "{ \"a\": ").unwrap();
        let out = dir.path().join("out");

        let result = split_tokens(&TokenOptions::new(&source, &out), |_| {});
        assert!(matches!(result, Err(SplitterError::Json(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_split_tokens_with_custom_categories() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Tokens.json");
        fs::write(&source, r##"{"textColor": "#111", "gap": 4}"##).unwrap();
        let categories = dir.path().join("categories.yaml");
        fs::write(
            &categories,
            "categories:\n  - pattern: color\n    file: Colors.json\nfallback: Rest.json\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let options = TokenOptions::new(&source, &out).with_categories(&categories);
        let report = split_tokens(&options, |_| {}).unwrap();

        assert_eq!(report.written.len(), 2);
        assert!(out.join("Colors.json").exists());
        assert!(out.join("Rest.json").exists());
        assert_eq!(report.find("Rest.json").and_then(|f| f.entries), Some(1));
    }
}
