//! Data model of an audit snapshot.
//!
//! Sources produce [`RawText`]; parsers turn it into a [`Table`] or a
//! [`FlatMap`]; the collector composes everything into one [`Snapshot`].

mod collected;
mod snapshot;
mod table;

pub use collected::{Collected, NOT_AVAILABLE, RawText};
pub use snapshot::{
    DiskSection, DistroSection, NetworkSection, PowerMgmtSection, ProcSection, SECTION_NAMES,
    Snapshot, ThpSection,
};
pub use table::{FlatMap, Row, Table};
