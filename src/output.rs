//! Writing the snapshot document and the sysctl listing.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::{FlatMap, Snapshot};
use crate::parser::render_sysctl_listing;

/// Error type for output failures.
#[derive(Debug)]
pub enum OutputError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "I/O error: {}", e),
            OutputError::Serialize(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(e: serde_json::Error) -> Self {
        OutputError::Serialize(e)
    }
}

/// File name of an audit document: `audit-<hostname>-<unix seconds>.json`.
pub fn audit_file_name(hostname: &str, timestamp: i64) -> String {
    format!("audit-{}-{}.json", hostname, timestamp)
}

/// Serializes a snapshot to JSON, pretty-printed unless `compact`.
pub fn render_document(snapshot: &Snapshot, compact: bool) -> Result<String, OutputError> {
    let document = if compact {
        serde_json::to_string(snapshot)?
    } else {
        serde_json::to_string_pretty(snapshot)?
    };
    Ok(document)
}

/// Writes the snapshot document into `dir` and returns the file's path.
pub fn write_document(
    dir: &Path,
    hostname: &str,
    timestamp: i64,
    snapshot: &Snapshot,
    compact: bool,
) -> Result<PathBuf, OutputError> {
    let document = render_document(snapshot, compact)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(audit_file_name(hostname, timestamp));
    fs::write(&path, document)?;
    debug!("wrote {}", path.display());
    Ok(path)
}

/// Writes `map` as a `key = value` listing.
pub fn write_sysctl_listing(path: &Path, map: &FlatMap) -> Result<(), OutputError> {
    fs::write(path, render_sysctl_listing(map))?;
    debug!("wrote {} sysctl keys to {}", map.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{Collector, MockFs, MockRunner};
    use crate::config::AuditConfig;
    use crate::parser::parse_sysctl;

    fn snapshot() -> Snapshot {
        Collector::new(
            MockFs::typical_system(),
            MockRunner::typical_system(),
            AuditConfig::default(),
        )
        .collect_snapshot()
    }

    #[test]
    fn test_audit_file_name() {
        assert_eq!(
            audit_file_name("db-01", 1700000000),
            "audit-db-01-1700000000.json"
        );
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("reports");
        let path = write_document(&out_dir, "db-01", 42, &snapshot(), false).unwrap();

        assert_eq!(path, out_dir.join("audit-db-01-42.json"));
        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["sysctl"]["vm.swappiness"], "60");
        assert_eq!(value["proc"]["partitions"][0]["name"], "sda");
        assert_eq!(value["disk"]["scheduler"]["loop0"], "not available");
        assert!(content.contains('\n'));
    }

    #[test]
    fn test_compact_document_is_single_line() {
        let document = render_document(&snapshot(), true).unwrap();
        assert!(!document.contains('\n'));
    }

    #[test]
    fn test_sysctl_listing_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysctl.txt");
        let map = snapshot().sysctl.into_data().unwrap();

        write_sysctl_listing(&path, &map).unwrap();
        let reparsed = parse_sysctl(&fs::read_to_string(&path).unwrap());
        assert_eq!(reparsed, map);
    }
}
