//! Host state collection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Collector                           │
//! │   one function per section, composed into a Snapshot         │
//! │                              │                               │
//! │                     ┌────────▼────────┐                      │
//! │                     │     Sources     │  text | Unavailable  │
//! │                     └───┬─────────┬───┘                      │
//! │             ┌───────────▼──┐   ┌──▼────────────┐             │
//! │             │  FileSystem  │   │ CommandRunner │  (traits)   │
//! │             └───────┬──────┘   └──────┬────────┘             │
//! └─────────────────────┼─────────────────┼──────────────────────┘
//!            ┌──────────┴───┐      ┌──────┴─────────┐
//!            │ RealFs       │      │ SystemRunner   │
//!            │ MockFs       │      │ MockRunner     │
//!            └──────────────┘      └────────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use sysaudit::collector::{Collector, RealFs, SystemRunner};
//! use sysaudit::config::AuditConfig;
//!
//! let config = AuditConfig::default();
//! let runner = SystemRunner::new(config.command_timeout);
//! let collector = Collector::new(RealFs::new(), runner, config);
//! let snapshot = collector.collect_snapshot();
//! ```
//!
//! ## Testing (with mocks)
//!
//! ```
//! use sysaudit::collector::{Collector, MockFs, MockRunner};
//! use sysaudit::config::AuditConfig;
//!
//! let collector = Collector::new(
//!     MockFs::typical_system(),
//!     MockRunner::typical_system(),
//!     AuditConfig::default(),
//! );
//! let snapshot = collector.collect_snapshot();
//! assert!(snapshot.unavailable_sources().is_empty());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod host;
pub mod mock;
mod runner;
mod source;
pub mod traits;

pub use collector::{Collector, RELEASE_FILES};
pub use mock::{MockFs, MockRunner};
pub use runner::SystemRunner;
pub use source::Sources;
pub use traits::{CommandError, CommandRunner, FileSystem, RealFs};
