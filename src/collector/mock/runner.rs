//! Canned command outputs for testing.

use std::collections::HashMap;
use std::io;

use crate::collector::traits::{CommandError, CommandRunner};

#[derive(Debug, Clone)]
enum Outcome {
    Stdout(String),
    Exit(i32),
}

/// Command runner that answers from a table of canned results.
///
/// Commands are keyed by their full command line (`"ss -tan"`). Anything not
/// in the table behaves like a program that is not installed.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    outcomes: HashMap<String, Outcome>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a successful run printing `stdout`.
    pub fn add_output(&mut self, command_line: &str, stdout: impl Into<String>) {
        self.outcomes
            .insert(command_line.to_string(), Outcome::Stdout(stdout.into()));
    }

    /// Registers a run that exits with the non-zero `code`.
    pub fn add_failure(&mut self, command_line: &str, code: i32) {
        self.outcomes
            .insert(command_line.to_string(), Outcome::Exit(code));
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        match self.outcomes.get(&command_line) {
            Some(Outcome::Stdout(stdout)) => Ok(stdout.clone()),
            Some(Outcome::Exit(code)) => Err(CommandError::ExitStatus {
                program: program.to_string(),
                code: Some(*code),
            }),
            None => Err(CommandError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such command"),
            }),
        }
    }
}
