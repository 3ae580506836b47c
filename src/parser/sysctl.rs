//! Parser for `sysctl -a` style listings.

use std::fmt::Write;

use crate::model::FlatMap;

/// Entry separators, in detection order.
const SEPARATORS: [&str; 2] = [" = ", ": "];

/// Parses `key = value` / `key: value` lines into a [`FlatMap`].
///
/// The separator is detected per line: `" = "` if the line contains it,
/// otherwise `": "`. The line is split at the first occurrence of the chosen
/// separator, so `a = b: c` is `a` -> `b: c` and `a: b = c` is `a: b` -> `c`.
/// Keys and values are trimmed but otherwise kept verbatim. A line ending in
/// a separator minus its trailing space (`fs.empty =`, as left by trimming
/// the last line of the output) is an entry with an empty value. Other lines
/// with neither separator are skipped; duplicate keys keep the last value.
pub fn parse_sysctl(content: &str) -> FlatMap {
    let mut map = FlatMap::new();

    for line in content.lines().filter(|line| !line.is_empty()) {
        let Some((key, value)) = split_entry(line) else {
            continue;
        };
        map.insert(key.trim().to_string(), value.trim().to_string());
    }

    map
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    SEPARATORS
        .iter()
        .find_map(|sep| line.split_once(sep))
        .or_else(|| {
            SEPARATORS
                .iter()
                .find_map(|sep| line.strip_suffix(sep.trim_end()))
                .map(|key| (key, ""))
        })
}

/// Renders a map as a `key = value` listing, one entry per line in key order.
///
/// Feeding the output back through [`parse_sysctl`] gives the same map as
/// long as no key contains `" = "` and keys and values carry no surrounding
/// whitespace, which holds for any map [`parse_sysctl`] produced.
pub fn render_sysctl_listing(map: &FlatMap) -> String {
    let mut listing = String::new();
    for (key, value) in map {
        let _ = writeln!(listing, "{key} = {value}");
    }
    listing
}
