//! Abstractions over the filesystem and process execution.
//!
//! The collector reads pseudo-files through [`FileSystem`] and runs
//! diagnostic commands through [`CommandRunner`], so it can work against the
//! real host or against in-memory mocks in tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    ///
    /// # Returns
    /// Full paths of the direct children, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Abstraction for running an external command to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its standard output.
    ///
    /// A command that cannot be started, exits unsuccessfully or runs past
    /// the runner's deadline is an error.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// Error type for command execution failures.
#[derive(Debug)]
pub enum CommandError {
    /// The program could not be started (usually: not installed).
    Spawn { program: String, source: io::Error },
    /// I/O error while waiting for the program or reading its output.
    Io(io::Error),
    /// The program exited unsuccessfully. `code` is `None` when it was
    /// killed by a signal.
    ExitStatus { program: String, code: Option<i32> },
    /// The program ran past the deadline and was killed, or its stdout was
    /// still held open at the deadline.
    TimedOut { program: String, timeout: Duration },
}

impl CommandError {
    pub(crate) fn exit_status(program: &str, status: ExitStatus) -> Self {
        CommandError::ExitStatus {
            program: program.to_string(),
            code: status.code(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Spawn { program, source } => {
                write!(f, "failed to start {}: {}", program, source)
            }
            CommandError::Io(e) => write!(f, "I/O error: {}", e),
            CommandError::ExitStatus {
                program,
                code: Some(code),
            } => write!(f, "{} exited with status {}", program, code),
            CommandError::ExitStatus { program, code: None } => {
                write!(f, "{} terminated by signal", program)
            }
            CommandError::TimedOut { program, timeout } => {
                write!(f, "{} timed out after {:?}", program, timeout)
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Spawn { source, .. } => Some(source),
            CommandError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        CommandError::Io(e)
    }
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_real_fs_read_to_string() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let content = fs.read_to_string(&cargo_toml).unwrap();
        assert!(content.contains("[package]"));
    }

    #[test]
    fn test_real_fs_exists() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        assert!(fs.exists(&cargo_toml));
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn test_real_fs_read_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "1").unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();

        let fs = RealFs::new();
        let mut entries = fs.read_dir(dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries, vec![dir.path().join("a"), dir.path().join("b")]);
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::ExitStatus {
            program: "lsblk".to_string(),
            code: Some(32),
        };
        assert_eq!(err.to_string(), "lsblk exited with status 32");

        let err = CommandError::TimedOut {
            program: "dmesg".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "dmesg timed out after 5s");
    }
}
