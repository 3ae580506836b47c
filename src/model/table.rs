//! Tables and flat maps produced by the text parsers.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Single-level key/value mapping. Keys are unique and sorted; inserting a
/// duplicate key replaces the earlier value.
pub type FlatMap = BTreeMap<String, String>;

/// One data line of a table, keyed by normalized column name.
///
/// Fields keep header order. Setting a name that is already present replaces
/// its value in place, so a row never holds two fields with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets `name` to `value`, overwriting an existing field of that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows sharing one header, in source line order.
///
/// Serializes as a plain array of row objects; the header itself is not
/// part of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table with the given normalized header and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_insert_overwrites_in_place() {
        let mut row = Row::new();
        row.insert("a", "1");
        row.insert("b", "2");
        row.insert("a", "3");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some("3"));
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_row_serializes_in_header_order() {
        let mut row = Row::new();
        row.insert("zeta", "1");
        row.insert("alpha", "2");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_table_serializes_as_row_array() {
        let mut table = Table::new(vec!["name".to_string()]);
        let mut row = Row::new();
        row.insert("name", "sda");
        table.push(row);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"name":"sda"}]"#);
    }

    #[test]
    fn test_empty_table_serializes_as_empty_array() {
        let table = Table::default();
        assert_eq!(serde_json::to_string(&table).unwrap(), "[]");
        assert!(table.columns().is_empty());
    }
}
