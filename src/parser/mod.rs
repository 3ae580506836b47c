//! Parsers for command and pseudo-file output.
//!
//! These are pure functions over string input: no I/O, no shared state.
//! None of them fail. Lines that do not fit the expected shape are skipped
//! and short table rows are padded, so the worst result for a garbled
//! source is an empty or partially filled structure.

mod delimited;
mod field;
mod sysctl;
mod tabular;

pub use delimited::parse_delimited;
pub use field::{header_field_name, key_field_name};
pub use sysctl::{parse_sysctl, render_sysctl_listing};
pub use tabular::parse_tabular;
