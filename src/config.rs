//! Collection settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::collector::SystemRunner;

/// Where the collector looks for pseudo-filesystems, and how long a single
/// command may run.
///
/// The defaults match a normal Linux host. Pointing the roots elsewhere is
/// useful for auditing a mounted image or a captured tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Root of the proc filesystem (usually `/proc`).
    pub proc_path: PathBuf,
    /// Root of the sysfs filesystem (usually `/sys`).
    pub sys_path: PathBuf,
    /// Directory holding distro identification files (usually `/etc`).
    pub etc_path: PathBuf,
    /// Deadline for each external command.
    pub command_timeout: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from("/proc"),
            sys_path: PathBuf::from("/sys"),
            etc_path: PathBuf::from("/etc"),
            command_timeout: SystemRunner::DEFAULT_TIMEOUT,
        }
    }
}

impl AuditConfig {
    /// Path of `relative` under the proc root.
    pub fn proc(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.proc_path.join(relative)
    }

    /// Path of `relative` under the sysfs root.
    pub fn sys(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.sys_path.join(relative)
    }

    /// Path of `relative` under the etc directory.
    pub fn etc(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.etc_path.join(relative)
    }
}
