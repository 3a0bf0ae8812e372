//! Harden Config
//!
//! This crate contains the serializable configuration types for a hardening
//! run. They describe where run directories are created, how the external
//! automation engine is invoked, and what the emitted artifacts are called.
//!
//! Configuration can be loaded from:
//! - JSON files (via CLI with `--config=harden.json`)
//! - Constructed in code (tests, embedders)
//!
//! A config file ([`ConfigFile`]) may omit any field; the CLI supplies the
//! report root when the file does not name one:
//!
//! ```json
//! {
//!   "report_root": "/var/lib/harden/reports",
//!   "engine": { "playbook_args": ["--forks", "20"] }
//! }
//! ```

mod artifacts;
mod engine;
mod runner;

pub use artifacts::ArtifactNames;
pub use engine::EngineConfig;
pub use runner::{ConfigFile, RunnerConfig};
