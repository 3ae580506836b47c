//! Sysctl drift between two hosts.
//!
//! Only keys present on both sides are compared: the report is about shared
//! configuration that differs, not about keys one kernel has and the other
//! lacks.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::collector::FileSystem;
use crate::model::{FlatMap, NOT_AVAILABLE};
use crate::parser::parse_sysctl;

/// One shared key whose value differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub key: String,
    pub old: String,
    pub new: String,
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} => {})", self.key, self.old, self.new)
    }
}

/// Returns every key present in both maps whose values differ, sorted by key.
pub fn diff(old: &FlatMap, new: &FlatMap) -> Vec<DiffEntry> {
    old.iter()
        .filter_map(|(key, old_value)| {
            let new_value = new.get(key)?;
            (old_value != new_value).then(|| DiffEntry {
                key: key.clone(),
                old: old_value.clone(),
                new: new_value.clone(),
            })
        })
        .collect()
}

/// Error type for loading a diff input.
#[derive(Debug)]
pub enum DiffError {
    /// The input file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The input looked like a snapshot document but is not valid JSON.
    InvalidDocument { path: PathBuf, reason: String },
    /// The snapshot document carries no usable `sysctl` section.
    MissingSysctl { path: PathBuf },
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            DiffError::InvalidDocument { path, reason } => {
                write!(f, "{} is not a valid snapshot document: {}", path.display(), reason)
            }
            DiffError::MissingSysctl { path } => {
                write!(f, "{} has no sysctl section", path.display())
            }
        }
    }
}

impl std::error::Error for DiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiffError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads the sysctl map from a listing or from a snapshot document.
///
/// Content starting with `{` is treated as a snapshot document and its
/// `sysctl` object is used; anything else is parsed as a `sysctl -a` listing.
pub fn load_sysctl_map<F: FileSystem>(fs: &F, path: &Path) -> Result<FlatMap, DiffError> {
    let content = fs.read_to_string(path).map_err(|source| DiffError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim_start().starts_with('{') {
        debug!("{}: reading sysctl section of snapshot document", path.display());
        sysctl_from_document(&content, path)
    } else {
        debug!("{}: reading sysctl listing", path.display());
        Ok(parse_sysctl(&content))
    }
}

fn sysctl_from_document(content: &str, path: &Path) -> Result<FlatMap, DiffError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| DiffError::InvalidDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let Some(section) = document.get("sysctl").and_then(Value::as_object) else {
        if document.get("sysctl").and_then(Value::as_str) == Some(NOT_AVAILABLE) {
            debug!("{}: sysctl was unavailable when collected", path.display());
        }
        return Err(DiffError::MissingSysctl {
            path: path.to_path_buf(),
        });
    };

    Ok(section
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect())
}
