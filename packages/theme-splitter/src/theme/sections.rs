//! Extraction of named sections from a theme source document.

use std::sync::LazyLock;

use regex::Regex;

use super::scanner::{scan_keys, KeyOccurrence};

/// One import statement at the start of a line, up to the `;` ending a line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IMPORT_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^import\b[\s\S]*?;[ \t]*$").expect("valid regex"));

/// Key of the component table.
const COMPONENTS_KEY: &str = "components";

/// Named top-level regions of a theme, in aggregator order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Typography,
    Palette,
    Shadows,
}

impl Region {
    /// All regions in the order they are exported from the index module.
    pub const ALL: [Region; 3] = [Region::Typography, Region::Palette, Region::Shadows];

    /// Key of the region in the source, also used as the exported symbol.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Typography => "typography",
            Self::Palette => "palette",
            Self::Shadows => "shadows",
        }
    }

    /// Output directory name for the region module.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Typography => "Typography",
            Self::Palette => "Palette",
            Self::Shadows => "Shadows",
        }
    }

    /// Opening delimiter of the region's value.
    #[must_use]
    pub fn opening(self) -> u8 {
        match self {
            Self::Typography | Self::Palette => b'{',
            Self::Shadows => b'[',
        }
    }

    /// Whether the region module is prefixed with the import preamble.
    ///
    /// Shadows are plain strings and never reference imported symbols.
    #[must_use]
    pub fn uses_preamble(self) -> bool {
        !matches!(self, Self::Shadows)
    }
}

/// A single entry of the component table, e.g. `MuiButton: { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSection {
    pub name: String,
    /// Balanced object literal, braces included.
    pub content: String,
}

/// Everything pulled out of a theme source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSections {
    /// Leading import block, empty when the source has none.
    pub preamble: String,
    pub typography: Option<String>,
    pub palette: Option<String>,
    pub shadows: Option<String>,
    /// Component entries in discovery order.
    pub components: Vec<ComponentSection>,
}

impl ThemeSections {
    /// Content of a named region, if it was found.
    #[must_use]
    pub fn region(&self, region: Region) -> Option<&str> {
        match region {
            Region::Typography => self.typography.as_deref(),
            Region::Palette => self.palette.as_deref(),
            Region::Shadows => self.shadows.as_deref(),
        }
    }

    fn set_region(&mut self, region: Region, content: String) {
        match region {
            Region::Typography => self.typography = Some(content),
            Region::Palette => self.palette = Some(content),
            Region::Shadows => self.shadows = Some(content),
        }
    }

    /// True when neither a region nor a component was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Region::ALL.iter().all(|r| self.region(*r).is_none()) && self.components.is_empty()
    }
}

/// Extract the preamble, the named regions and the component table.
///
/// Missing or malformed regions are left out; this never fails.
#[must_use]
pub fn extract_sections(src: &str, component_prefix: &str) -> ThemeSections {
    let keys = scan_keys(src);
    let mut sections = ThemeSections {
        preamble: extract_preamble(src),
        ..ThemeSections::default()
    };

    for region in Region::ALL {
        match shallowest_value(src, &keys, region.key(), region.opening()) {
            Some((_, content)) => sections.set_region(region, content.to_string()),
            None => tracing::debug!(region = region.key(), "Region not found, skipping"),
        }
    }

    match shallowest_value(src, &keys, COMPONENTS_KEY, b'{') {
        Some((table, content)) => {
            sections.components =
                extract_components(src, &keys, table, content, component_prefix);
        }
        None => tracing::debug!("Component table not found, skipping"),
    }

    sections
}

/// Extract the leading import block.
///
/// Starts at the first import statement and extends over every import
/// statement that directly follows it.
#[must_use]
pub fn extract_preamble(src: &str) -> String {
    let Some(first) = IMPORT_STATEMENT.find(src) else {
        return String::new();
    };

    let mut end = first.end();
    loop {
        let next_start = end + (src.len() - end - src[end..].trim_start().len());
        match IMPORT_STATEMENT.find_at(src, next_start) {
            Some(next) if next.start() == next_start && next_start > end => end = next.end(),
            _ => break,
        }
    }

    src[first.start()..end].to_string()
}

/// Pick the shallowest `key:` whose value is a balanced literal opening with
/// `open`. Ties go to the first occurrence.
fn shallowest_value<'a>(
    src: &'a str,
    keys: &[KeyOccurrence<'a>],
    key: &str,
    open: u8,
) -> Option<(KeyOccurrence<'a>, &'a str)> {
    keys.iter()
        .filter(|k| k.key == key)
        .filter_map(|k| k.balanced_value(src, open).map(|v| (*k, v)))
        .min_by_key(|(k, _)| k.depth)
}

/// Collect the direct children of the component table that follow the
/// `<prefix><Uppercase>` naming convention and hold an object.
fn extract_components<'a>(
    src: &'a str,
    keys: &[KeyOccurrence<'a>],
    table: KeyOccurrence<'a>,
    table_content: &str,
    prefix: &str,
) -> Vec<ComponentSection> {
    let body_start = table.value_start;
    let body_end = body_start + table_content.len();
    let mut components: Vec<ComponentSection> = Vec::new();

    for key in keys
        .iter()
        .filter(|k| k.key_start > body_start && k.key_start < body_end)
        .filter(|k| k.depth == table.depth + 1)
    {
        if !is_component_name(key.key, prefix) {
            tracing::debug!(key = key.key, "Skipping non-component entry");
            continue;
        }
        let Some(content) = key.balanced_value(src, b'{') else {
            tracing::debug!(component = key.key, "Component body is not a balanced object");
            continue;
        };

        // A repeated name keeps its first position and takes the later body
        if let Some(existing) = components.iter_mut().find(|c| c.name == key.key) {
            existing.content = content.to_string();
        } else {
            components.push(ComponentSection {
                name: key.key.to_string(),
                content: content.to_string(),
            });
        }
    }

    components
}

/// Check the `<prefix><Uppercase><alphanumerics>` naming convention.
///
/// # Examples
/// ```
/// use theme_splitter::theme::is_component_name;
///
/// assert!(is_component_name("MuiButton", "Mui"));
/// assert!(!is_component_name("Muibutton", "Mui"));
/// assert!(!is_component_name("Mui", "Mui"));
/// ```
#[must_use]
pub fn is_component_name(name: &str, prefix: &str) -> bool {
    let Some(rest) = name.strip_prefix(prefix) else {
        return false;
    };
    let mut chars = rest.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}
