//! Command runner backed by `std::process` with a hard deadline.

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::collector::traits::{CommandError, CommandRunner};

/// How often a running child is checked for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs commands on the host, killing any that outlive `timeout`.
///
/// Stdout is captured; stderr is discarded. Stdout is drained on a helper
/// thread so a command with a large output (`dmesg`) cannot stall on a full
/// pipe while we wait for it. The deadline covers draining too: a background
/// process that inherits stdout and keeps the pipe open past it is a timeout.
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                // The reader is left detached: a grandchild may still hold the pipe.
                return Err(CommandError::TimedOut {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let remaining = self.timeout.saturating_sub(started.elapsed());
        let output = match rx.recv_timeout(remaining) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => {
                // The reader is left detached, blocked on the inherited pipe.
                return Err(CommandError::TimedOut {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(io::Error::other("stdout reader exited without a result").into());
            }
        };
        trace!(
            "{} finished in {:?} ({} bytes)",
            program,
            started.elapsed(),
            output.len()
        );

        if !status.success() {
            return Err(CommandError::exit_status(program, status));
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
