//! Harden Facts
//!
//! Fact snapshots are the per-host inventory documents captured before any
//! task runs. They are diagnostic: a host with no facts is still reported,
//! it just carries an explicit [`FactSnapshot::Unavailable`] marker.
//!
//! [`FsFactReader`] loads the one-file-per-host layout written by the
//! engine's fact collection phase:
//!
//! ```text
//! {facts_dir}/
//! ├── web1          {"ansible_facts": {...}}
//! ├── web2.json     {"ansible_facts": {...}}
//! └── db1           {"unreachable": true, "msg": "..."}
//! ```

mod error;
mod reader;
mod snapshot;
mod system;

pub use error::FactError;
pub use reader::{FsFactReader, parse_fact_document};
pub use snapshot::{FactSet, FactSnapshot, NO_FACT_DOCUMENT};
pub use system::SystemInfo;
