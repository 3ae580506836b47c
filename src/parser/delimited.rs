//! Parser for one-entry-per-line `key<delimiter>value` text.

use crate::model::FlatMap;

use super::field::key_field_name;

/// Parses lines of `key<delimiter>value` into a [`FlatMap`].
///
/// Each line is split once, at the first occurrence of `delimiter`. Keys are
/// normalized with [`key_field_name`], values are trimmed. Lines without the
/// delimiter are skipped, and a later duplicate key replaces an earlier one.
/// An empty delimiter matches nothing.
pub fn parse_delimited(delimiter: &str, content: &str) -> FlatMap {
    let mut map = FlatMap::new();
    if delimiter.is_empty() {
        return map;
    }

    for line in content.lines().filter(|line| !line.is_empty()) {
        let Some((key, value)) = line.split_once(delimiter) else {
            continue;
        };
        map.insert(key_field_name(key), value.trim().to_string());
    }

    map
}
