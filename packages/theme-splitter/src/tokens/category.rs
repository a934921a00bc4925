//! Ordered category table mapping token keys to destination files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SplitterError};

/// File receiving every key no rule matches.
pub const DEFAULT_FALLBACK: &str = "Misc.json";

/// Built-in rules. Order is significant: the first matching rule wins.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("palette", "Palette.json"),
    ("colors", "Palette.json"),
    ("primary", "Palette.json"),
    ("secondary", "Palette.json"),
    ("typography", "Typography.json"),
    ("fontFamily", "Typography.json"),
    ("fontSize", "Typography.json"),
    ("fontWeight", "Typography.json"),
    ("lineHeight", "Typography.json"),
    ("brand", "Brand-Colors.json"),
    ("breakpoints", "Breakpoints.json"),
    ("spacing", "Spacing.json"),
    ("shadows", "Shadows.json"),
    ("borderRadius", "BorderRadius.json"),
    ("zIndex", "ZIndex.json"),
];

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

/// A single path component with no separators, not `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// A substring pattern and the file that keys matching it go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub pattern: String,
    #[serde(rename = "file")]
    pub file_name: String,
}

impl CategoryRule {
    #[must_use]
    pub fn new(pattern: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            file_name: file_name.into(),
        }
    }

    /// Case-insensitive substring match against a token key.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key.to_lowercase().contains(&self.pattern.to_lowercase())
    }
}

/// Entries assigned to one destination file, before any size-based splitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub file_name: String,
    pub entries: Map<String, Value>,
}

/// Ordered list of category rules plus the fallback destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    #[serde(rename = "categories")]
    pub rules: Vec<CategoryRule>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(pattern, file)| CategoryRule::new(*pattern, *file))
                .collect(),
            fallback: default_fallback(),
        }
    }
}

impl CategoryTable {
    /// Build a validated table.
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Result<Self> {
        let table = Self {
            rules,
            fallback: fallback.into(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON or YAML file, chosen by extension.
    ///
    /// ```yaml
    /// categories:
    ///   - pattern: color
    ///     file: Colors.json
    /// fallback: Other.json
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SplitterError::SourceNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let table: Self = if is_yaml {
            serde_yaml_ng::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(SplitterError::InvalidCategoryTable(
                "at least one category is required".to_string(),
            ));
        }
        if let Some(rule) = self.rules.iter().find(|r| r.pattern.is_empty()) {
            return Err(SplitterError::InvalidCategoryTable(format!(
                "empty pattern for {}",
                rule.file_name
            )));
        }
        if self.rules.iter().any(|r| r.file_name.is_empty()) || self.fallback.is_empty() {
            return Err(SplitterError::InvalidCategoryTable(
                "file names must not be empty".to_string(),
            ));
        }
        if let Some(name) = self
            .rules
            .iter()
            .map(|r| r.file_name.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
            .find(|name| !is_plain_file_name(name))
        {
            return Err(SplitterError::InvalidCategoryTable(format!(
                "file name {name:?} must be a plain file name inside the output directory"
            )));
        }
        Ok(())
    }

    /// Destination file for a key: the first matching rule, else the fallback.
    #[must_use]
    pub fn classify(&self, key: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(key))
            .map_or(self.fallback.as_str(), |rule| rule.file_name.as_str())
    }

    /// Destination files in output order: first appearance in the table,
    /// then the fallback.
    #[must_use]
    pub fn destinations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .rules
            .iter()
            .map(|r| r.file_name.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Assign every top-level entry to a bucket.
    ///
    /// Entries keep their document order inside each bucket. Empty buckets
    /// are dropped.
    #[must_use]
    pub fn categorize(&self, document: &Map<String, Value>) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = self
            .destinations()
            .into_iter()
            .map(|name| Bucket {
                file_name: name.to_string(),
                entries: Map::new(),
            })
            .collect();

        for (key, value) in document {
            let destination = self.classify(key);
            tracing::debug!(key = %key, destination, "Categorized token");
            if let Some(bucket) = buckets.iter_mut().find(|b| b.file_name == destination) {
                bucket.entries.insert(key.clone(), value.clone());
            }
        }

        buckets.retain(|b| !b.entries.is_empty());
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(table.classify("primaryColor"), "Palette.json");
        assert_eq!(table.classify("FONTSIZE_LARGE"), "Typography.json");
        assert_eq!(table.classify("zIndexModal"), "ZIndex.json");
        assert_eq!(table.classify("spacingUnit"), "Spacing.json");
        assert_eq!(table.classify("transitions"), "Misc.json");
    }

    #[test]
    fn test_classify_first_declared_rule_wins() {
        // Matches both "brand" and "primary"; "primary" is declared earlier
        let table = CategoryTable::default();
        assert_eq!(table.classify("brandPrimary"), "Palette.json");

        let reversed = CategoryTable::new(
            vec![
                CategoryRule::new("brand", "Brand.json"),
                CategoryRule::new("primary", "Palette.json"),
            ],
            "Misc.json",
        )
        .unwrap();
        assert_eq!(reversed.classify("brandPrimary"), "Brand.json");
    }

    #[test]
    fn test_destinations_order() {
        let table = CategoryTable::default();
        assert_eq!(
            table.destinations(),
            vec![
                "Palette.json",
                "Typography.json",
                "Brand-Colors.json",
                "Breakpoints.json",
                "Spacing.json",
                "Shadows.json",
                "BorderRadius.json",
                "ZIndex.json",
                "Misc.json",
            ]
        );
    }

    #[test]
    fn test_categorize_example_document() {
        let doc = object(json!({
            "primaryColor": "#fff",
            "spacingUnit": 8,
            "zIndexModal": 1200
        }));
        let buckets = CategoryTable::default().categorize(&doc);

        let names: Vec<&str> = buckets.iter().map(|b| b.file_name.as_str()).collect();
        assert_eq!(names, vec!["Palette.json", "Spacing.json", "ZIndex.json"]);
        assert!(buckets.iter().all(|b| b.entries.len() == 1));
        assert_eq!(buckets[0].entries["primaryColor"], json!("#fff"));
    }

    #[test]
    fn test_categorize_preserves_document_order() {
        let doc = object(json!({
            "zeta": 1,
            "paletteB": 2,
            "alpha": 3,
            "paletteA": 4
        }));
        let buckets = CategoryTable::default().categorize(&doc);

        let palette: Vec<&String> = buckets[0].entries.keys().collect();
        assert_eq!(palette, vec!["paletteB", "paletteA"]);
        let misc: Vec<&String> = buckets[1].entries.keys().collect();
        assert_eq!(misc, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_new_rejects_empty_pattern() {
        let result = CategoryTable::new(vec![CategoryRule::new("", "All.json")], "Misc.json");
        assert!(matches!(result, Err(SplitterError::InvalidCategoryTable(_))));
    }

    #[test]
    fn test_new_rejects_file_names_outside_output_dir() {
        for name in ["../Escape.json", "nested/Colors.json", "a.d\\X", ".."] {
            let result = CategoryTable::new(vec![CategoryRule::new("color", name)], "Misc.json");
            assert!(
                matches!(result, Err(SplitterError::InvalidCategoryTable(_))),
                "{name} accepted"
            );
        }

        let result = CategoryTable::new(
            vec![CategoryRule::new("color", "Colors.json")],
            "../Misc.json",
        );
        assert!(matches!(result, Err(SplitterError::InvalidCategoryTable(_))));
    }

    #[test]
    fn test_load_rejects_traversing_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.yaml");
        fs::write(
            &path,
            "categories:\n  - pattern: color\n    file: ../Colors.json\n",
        )
        .unwrap();

        assert!(matches!(
            CategoryTable::load(&path),
            Err(SplitterError::InvalidCategoryTable(_))
        ));
    }

    #[test]
    fn test_new_rejects_empty_rules() {
        assert!(CategoryTable::new(Vec::new(), "Misc.json").is_err());
    }

    #[test]
    fn test_load_json_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        fs::write(
            &path,
            r#"{"categories": [{"pattern": "color", "file": "Colors.json"}]}"#,
        )
        .unwrap();

        let table = CategoryTable::load(&path).unwrap();
        assert_eq!(table.rules, vec![CategoryRule::new("color", "Colors.json")]);
        assert_eq!(table.fallback, "Misc.json");
    }

    #[test]
    fn test_load_yaml_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.yaml");
        fs::write(
            &path,
            "categories:\n  - pattern: color\n    file: Colors.json\nfallback: Other.json\n",
        )
        .unwrap();

        let table = CategoryTable::load(&path).unwrap();
        assert_eq!(table.classify("textColor"), "Colors.json");
        assert_eq!(table.classify("size"), "Other.json");
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.yml");
        fs::write(&path, "categories: [ { pattern: ").unwrap();
        assert!(matches!(
            CategoryTable::load(&path),
            Err(SplitterError::Yaml(_))
        ));
    }
}
