//! Raw text sources: files and commands, collapsed to data or `Unavailable`.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, trace};

use crate::collector::traits::{CommandRunner, FileSystem};
use crate::model::{Collected, RawText};

/// Reads files and runs commands, turning every failure into
/// [`Collected::Unavailable`].
///
/// The cause of a failure is logged at debug level and then dropped; callers
/// only ever see text or the sentinel. Text is trimmed of surrounding
/// whitespace.
pub struct Sources<F: FileSystem, R: CommandRunner> {
    fs: F,
    runner: R,
}

impl<F: FileSystem, R: CommandRunner> Sources<F, R> {
    pub fn new(fs: F, runner: R) -> Self {
        Self { fs, runner }
    }

    /// Whether `path` exists, without reading it.
    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Reads a file.
    pub fn read_file(&self, path: &Path) -> RawText {
        let started = Instant::now();
        let text = match self.fs.read_to_string(path) {
            Ok(content) => Collected::Data(content.trim().to_string()),
            Err(e) => {
                debug!("{}: unavailable ({})", path.display(), e);
                Collected::Unavailable
            }
        };
        trace!("read {} in {:?}", path.display(), started.elapsed());
        text
    }

    /// Runs a command given as `[program, args...]`.
    pub fn run_command(&self, argv: &[&str]) -> RawText {
        let Some((program, args)) = argv.split_first() else {
            return Collected::Unavailable;
        };

        let started = Instant::now();
        let text = match self.runner.run(program, args) {
            Ok(stdout) => Collected::Data(stdout.trim().to_string()),
            Err(e) => {
                debug!("`{}`: unavailable ({})", argv.join(" "), e);
                Collected::Unavailable
            }
        };
        trace!("ran `{}` in {:?}", argv.join(" "), started.elapsed());
        text
    }

    /// Lists the entry names of a directory, sorted.
    pub fn list_dir(&self, path: &Path) -> Collected<Vec<String>> {
        match self.fs.read_dir(path) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .iter()
                    .filter_map(|entry| entry.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect();
                names.sort();
                Collected::Data(names)
            }
            Err(e) => {
                debug!("{}: cannot list ({})", path.display(), e);
                Collected::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockFs, MockRunner};

    fn sources(fs: MockFs, runner: MockRunner) -> Sources<MockFs, MockRunner> {
        Sources::new(fs, runner)
    }

    #[test]
    fn test_read_file_trims() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        let src = sources(fs, MockRunner::new());

        assert_eq!(
            src.read_file(Path::new("/proc/loadavg")),
            Collected::Data("0.15 0.10 0.05 1/150 1234".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let src = sources(MockFs::new(), MockRunner::new());
        assert_eq!(
            src.read_file(Path::new("/proc/nope")),
            Collected::Unavailable
        );
    }

    #[test]
    fn test_run_command_trims_stdout() {
        let mut runner = MockRunner::new();
        runner.add_output("free -m", "              total\nMem:  100\n\n");
        let src = sources(MockFs::new(), runner);

        assert_eq!(
            src.run_command(&["free", "-m"]),
            Collected::Data("total\nMem:  100".to_string())
        );
    }

    #[test]
    fn test_failed_command_is_unavailable() {
        let mut runner = MockRunner::new();
        runner.add_failure("dmesg", 1);
        let src = sources(MockFs::new(), runner);

        assert_eq!(src.run_command(&["dmesg"]), Collected::Unavailable);
        assert_eq!(src.run_command(&["ifconfig"]), Collected::Unavailable);
        assert_eq!(src.run_command(&[]), Collected::Unavailable);
    }

    #[test]
    fn test_exists() {
        let mut fs = MockFs::new();
        fs.add_file("/etc/os-release", "ID=debian\n");
        let src = sources(fs, MockRunner::new());

        assert!(src.exists(Path::new("/etc/os-release")));
        assert!(src.exists(Path::new("/etc")));
        assert!(!src.exists(Path::new("/etc/redhat-release")));
    }

    #[test]
    fn test_list_dir_sorted_names() {
        let mut fs = MockFs::new();
        fs.add_dir("/sys/block/sdb");
        fs.add_dir("/sys/block/sda");
        fs.add_file("/sys/block/loop0/queue/scheduler", "none");
        let src = sources(fs, MockRunner::new());

        assert_eq!(
            src.list_dir(Path::new("/sys/block")),
            Collected::Data(vec![
                "loop0".to_string(),
                "sda".to_string(),
                "sdb".to_string()
            ])
        );
        assert_eq!(
            src.list_dir(Path::new("/sys/nothing")),
            Collected::Unavailable
        );
    }
}
