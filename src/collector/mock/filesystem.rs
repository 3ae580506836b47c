//! In-memory mock filesystem.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// `/proc`, `/sys` and `/etc` states without touching the host.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Adds a block device under `<sys_path>/block`.
    ///
    /// With `scheduler` set, `queue/scheduler` is created with that content;
    /// otherwise the device directory is left empty, like a device without
    /// an I/O queue.
    pub fn add_block_device(&mut self, sys_path: &str, name: &str, scheduler: Option<&str>) {
        let base = PathBuf::from(format!("{}/block/{}", sys_path, name));
        self.add_dir(&base);
        if let Some(scheduler) = scheduler {
            self.add_file(base.join("queue/scheduler"), format!("{}\n", scheduler));
        }
    }

    /// Loads a mock filesystem from a real directory, mounted at `virtual_root`.
    ///
    /// Useful for regression tests against captured `/proc` or `/sys` trees.
    /// Files that are not valid UTF-8 are skipped.
    pub fn from_directory(dir: &Path, virtual_root: &Path) -> io::Result<Self> {
        let mut fs = Self::new();
        load_directory_recursive(&mut fs, dir, virtual_root)?;
        Ok(fs)
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

fn load_directory_recursive(
    fs: &mut MockFs,
    real_path: &Path,
    virtual_path: &Path,
) -> io::Result<()> {
    fs.add_dir(virtual_path);

    for entry in std::fs::read_dir(real_path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let real_child = entry.path();
        let virtual_child = virtual_path.join(entry.file_name());

        if file_type.is_dir() {
            load_directory_recursive(fs, &real_child, &virtual_child)?;
        } else if file_type.is_file() {
            if let Ok(content) = std::fs::read_to_string(&real_child) {
                fs.add_file(&virtual_child, content);
            }
        }
    }
    Ok(())
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();

        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/cpuinfo", "processor\t: 0\n");

        assert!(fs.exists(Path::new("/proc/cpuinfo")));
        assert!(fs.exists(Path::new("/proc")));

        let content = fs.read_to_string(Path::new("/proc/cpuinfo")).unwrap();
        assert_eq!(content, "processor\t: 0\n");
    }

    #[test]
    fn test_mock_fs_read_dir() {
        let mut fs = MockFs::new();
        fs.add_file("/etc/issue", "Ubuntu");
        fs.add_file("/etc/os-release", "NAME=Ubuntu");
        fs.add_file("/etc/ssh/sshd_config", "");

        let etc_entries = fs.read_dir(Path::new("/etc")).unwrap();
        assert_eq!(etc_entries.len(), 3); // issue, os-release, ssh
    }

    #[test]
    fn test_mock_fs_add_block_device() {
        let mut fs = MockFs::new();
        fs.add_block_device("/sys", "sda", Some("[mq-deadline] none"));
        fs.add_block_device("/sys", "loop0", None);

        assert!(fs.exists(Path::new("/sys/block/loop0")));
        assert!(!fs.exists(Path::new("/sys/block/loop0/queue/scheduler")));
        let content = fs
            .read_to_string(Path::new("/sys/block/sda/queue/scheduler"))
            .unwrap();
        assert_eq!(content, "[mq-deadline] none\n");
    }

    #[test]
    fn test_mock_fs_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("net")).unwrap();
        std::fs::write(dir.path().join("uptime"), "1.0 2.0\n").unwrap();
        std::fs::write(dir.path().join("net/softnet_stat"), "0000 0000\n").unwrap();

        let fs = MockFs::from_directory(dir.path(), Path::new("/proc")).unwrap();
        assert_eq!(
            fs.read_to_string(Path::new("/proc/uptime")).unwrap(),
            "1.0 2.0\n"
        );
        assert!(fs.exists(Path::new("/proc/net/softnet_stat")));
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
