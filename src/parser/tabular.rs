//! Parser for whitespace-aligned tables with a header row.
//!
//! Used for `df -h`, `lsblk`, `ss -tan`, `/proc/cgroups` and
//! `/proc/partitions`.

use crate::model::{Row, Table};

use super::field::header_field_name;

/// Column names that `ss` prints with an inner space.
const ADDRESS_PORT_COLUMNS: [(&str, &str); 2] = [
    ("Local Address:Port", "Local-Address-Port"),
    ("Peer Address:Port", "Peer-Address-Port"),
];

/// Trailing header word of `df`'s "Mounted on" column.
const MARKER_TOKEN: &str = "on";

/// Parses a header line followed by data lines into a [`Table`].
///
/// Empty input gives an empty table with no columns, and so does a header
/// line with no tokens; its data lines are dropped. Blank data lines are
/// dropped (`/proc/partitions` has one right after its header). Rows shorter
/// than the header are padded with empty strings; extra values are dropped.
pub fn parse_tabular(content: &str) -> Table {
    let mut lines = content.lines();
    let Some(header) = lines.next().filter(|line| !line.trim().is_empty()) else {
        return Table::default();
    };

    let mut table = Table::new(header_columns(header));

    for line in lines {
        let values: Vec<&str> = line.split_whitespace().collect();
        if values.is_empty() {
            continue;
        }
        let row = build_row(table.columns(), &values);
        table.push(row);
    }

    table
}

/// Splits and normalizes the header line.
fn header_columns(header: &str) -> Vec<String> {
    let header = fuse_address_port_columns(header);
    let mut tokens: Vec<&str> = header.split_whitespace().collect();
    drop_marker_column(&mut tokens);
    tokens.into_iter().map(header_field_name).collect()
}

/// Joins the two-word `ss` address columns into single tokens.
fn fuse_address_port_columns(header: &str) -> String {
    ADDRESS_PORT_COLUMNS
        .iter()
        .fold(header.to_string(), |acc, &(from, to)| acc.replace(from, to))
}

/// Removes the first token that is exactly `on`.
///
/// `df` titles its last column "Mounted on", which would otherwise become two
/// columns for one value.
fn drop_marker_column(tokens: &mut Vec<&str>) {
    if let Some(pos) = tokens.iter().position(|token| *token == MARKER_TOKEN) {
        tokens.remove(pos);
    }
}

fn build_row(columns: &[String], values: &[&str]) -> Row {
    let mut row = Row::with_capacity(columns.len());
    for (idx, name) in columns.iter().enumerate() {
        row.insert(name.clone(), values.get(idx).copied().unwrap_or(""));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_df() {
        let content = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/sda1        50G   20G   28G  42% /
tmpfs           7.8G     0  7.8G   0% /dev/shm";
        let table = parse_tabular(content);

        assert_eq!(
            table.columns(),
            &["filesystem", "size", "used", "avail", "use", "mounted"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("filesystem"), Some("/dev/sda1"));
        assert_eq!(table.rows()[0].get("use"), Some("42%"));
        assert_eq!(table.rows()[1].get("mounted"), Some("/dev/shm"));
    }

    #[test]
    fn test_parse_proc_partitions_skips_blank_second_line() {
        let content = "\
major minor  #blocks  name

   8        0  488386584 sda
   8        1     524288 sda1
 259        0  976762584 nvme0n1";
        let table = parse_tabular(content);

        assert_eq!(table.columns(), &["major", "minor", "blocks", "name"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].get("name"), Some("sda"));
        assert_eq!(table.rows()[2].get("blocks"), Some("976762584"));
    }

    #[test]
    fn test_parse_ss_fuses_address_columns() {
        let content = "\
State      Recv-Q Send-Q Local Address:Port               Peer Address:Port
LISTEN     0      128          *:22                       *:*
ESTAB      0      0      10.0.0.5:22                10.0.0.9:51234";
        let table = parse_tabular(content);

        assert_eq!(
            table.columns(),
            &["state", "recvq", "sendq", "localaddressport", "peeraddressport"]
        );
        assert_eq!(table.rows()[1].get("localaddressport"), Some("10.0.0.5:22"));
        assert_eq!(table.rows()[1].get("peeraddressport"), Some("10.0.0.9:51234"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let content = "\
State  Recv-Q Send-Q Local Address:Port Peer Address:Port Process
LISTEN 0      128    0.0.0.0:22         0.0.0.0:*";
        let table = parse_tabular(content);

        let row = &table.rows()[0];
        assert_eq!(row.len(), table.columns().len());
        assert_eq!(row.get("process"), Some(""));
    }

    #[test]
    fn test_extra_values_are_dropped() {
        let table = parse_tabular("a b\n1 2 3 4");
        let row = &table.rows()[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some("2"));
    }

    #[test]
    fn test_header_whitespace_is_collapsed() {
        let table = parse_tabular("PID  User%  CPU Usage\n1 root 0.5 x");
        assert_eq!(table.columns(), &["pid", "user", "cpu", "usage"]);
    }

    #[test]
    fn test_only_first_exact_on_is_dropped() {
        let table = parse_tabular("name on On x on\n1 2 3 4");
        assert_eq!(table.columns(), &["name", "on", "x", "on"]);
    }

    #[test]
    fn test_row_count_excludes_blank_lines() {
        let content = "h1 h2\n1 2\n\n   \n3 4\n";
        let table = parse_tabular(content);
        assert_eq!(table.len(), 2);
        for row in table.rows() {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn test_leading_whitespace_does_not_shift_columns() {
        let table = parse_tabular("a b\n   1 2");
        assert_eq!(table.rows()[0].get("a"), Some("1"));
    }

    #[test]
    fn test_empty_input() {
        let table = parse_tabular("");
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_whitespace_header_drops_rows() {
        let table = parse_tabular("   \n1 2\n3 4");
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_header_only() {
        let table = parse_tabular("#subsys_name\thierarchy\tnum_cgroups\tenabled\n");
        assert_eq!(
            table.columns(),
            &["subsys_name", "hierarchy", "num_cgroups", "enabled"]
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_columns_collapse_to_last_value() {
        let table = parse_tabular("Use Use%\n1 2");
        let row = &table.rows()[0];
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("use"), Some("2"));
    }
}
