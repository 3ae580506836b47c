//! In-memory stand-ins for the host, for testing.
//!
//! This module provides `MockFs`, `MockRunner` and pre-built scenarios so the
//! collector can be exercised without a Linux host or root privileges.

mod filesystem;
mod runner;
mod scenarios;

pub use filesystem::MockFs;
pub use runner::MockRunner;
