//! Greedy size-bounded packing of token entries.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use super::category::Bucket;
use crate::error::Result;

/// Serialized size of `{}`, the starting point of every running part.
const EMPTY_OBJECT_SIZE: usize = 2;

/// Byte size of the two-space indented JSON serialization of `value`.
///
/// This is the exact form written to disk, so sizes computed here match the
/// files produced.
pub fn serialized_size<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    Ok(serde_json::to_string_pretty(value)?.len())
}

/// A one-entry object, serialized without cloning the value.
struct SingleEntry<'a>(&'a str, &'a Value);

impl Serialize for SingleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

/// A group of entries produced by [`pack_entries`].
#[derive(Debug, Clone, PartialEq)]
pub struct PackedGroup {
    pub entries: Map<String, Value>,
    /// Set when the group is a single entry larger than the bound.
    pub oversized: bool,
}

/// A named output part.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub file_name: String,
    pub entries: Map<String, Value>,
}

/// Greedily pack `entries` into groups whose estimated size stays within
/// `max_size`.
///
/// Entries are visited in order and never reordered. The running estimate
/// starts at the size of `{}` and adds the standalone serialized size of each
/// entry, which never underestimates the real size of the group. An entry
/// that alone exceeds `max_size` becomes a group of its own.
pub fn pack_entries(entries: &Map<String, Value>, max_size: usize) -> Result<Vec<PackedGroup>> {
    let mut groups = Vec::new();
    let mut current = Map::new();
    let mut current_size = EMPTY_OBJECT_SIZE;

    fn flush(groups: &mut Vec<PackedGroup>, current: &mut Map<String, Value>, size: &mut usize) {
        if !current.is_empty() {
            groups.push(PackedGroup {
                entries: std::mem::take(current),
                oversized: false,
            });
        }
        *size = EMPTY_OBJECT_SIZE;
    }

    for (key, value) in entries {
        let entry_size = serialized_size(&SingleEntry(key, value))?;

        if entry_size > max_size {
            flush(&mut groups, &mut current, &mut current_size);
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            groups.push(PackedGroup {
                entries: single,
                oversized: true,
            });
            continue;
        }

        if current_size + entry_size > max_size {
            flush(&mut groups, &mut current, &mut current_size);
        }

        current.insert(key.clone(), value.clone());
        current_size += entry_size;
    }

    flush(&mut groups, &mut current, &mut current_size);
    Ok(groups)
}

/// Name of the `index`-th part (1-based) of `base`.
///
/// # Examples
/// ```
/// use theme_splitter::tokens::part_file_name;
///
/// assert_eq!(part_file_name("Palette.json", 2), "Palette-part-2.json");
/// assert_eq!(part_file_name("Misc", 1), "Misc-part-1");
/// ```
#[must_use]
pub fn part_file_name(base: &str, index: usize) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-part-{index}.{ext}"),
        _ => format!("{base}-part-{index}"),
    }
}

/// Turn a bucket into named parts, each within `max_size` where possible.
///
/// Returns the parts and one warning per entry that exceeds the bound on its
/// own. A bucket that fits, or that packs into a single group, keeps its file
/// name; otherwise parts are numbered from 1.
pub fn split_bucket(bucket: &Bucket, max_size: usize) -> Result<(Vec<Part>, Vec<String>)> {
    let total = serialized_size(&bucket.entries)?;
    if total <= max_size {
        return Ok((
            vec![Part {
                file_name: bucket.file_name.clone(),
                entries: bucket.entries.clone(),
            }],
            Vec::new(),
        ));
    }

    tracing::debug!(
        file = %bucket.file_name,
        bytes = total,
        max = max_size,
        "Bucket exceeds size limit, packing into parts"
    );

    let groups = pack_entries(&bucket.entries, max_size)?;
    let mut warnings = Vec::new();
    for group in groups.iter().filter(|g| g.oversized) {
        for key in group.entries.keys() {
            tracing::warn!(
                key = %key,
                file = %bucket.file_name,
                max = max_size,
                "Token entry exceeds size limit on its own"
            );
            warnings.push(format!(
                "\"{key}\" exceeds {max_size} bytes on its own in {}",
                bucket.file_name
            ));
        }
    }

    let single = groups.len() == 1;
    let parts = groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| Part {
            file_name: if single {
                bucket.file_name.clone()
            } else {
                part_file_name(&bucket.file_name, i + 1)
            },
            entries: group.entries,
        })
        .collect();

    Ok((parts, warnings))
}
