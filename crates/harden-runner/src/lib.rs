//! Run coordination for harden.
//!
//! This crate provides the [`RunCoordinator`], which owns one run from start
//! to finish:
//! - Creating a uniquely named working directory under the report root
//! - Fact collection and playbook execution through an [`Engine`]
//! - Preserving the raw playbook output before it is interpreted
//! - Parsing, aggregation and report emission
//!
//! [`CommandEngine`] is the production engine; tests substitute their own.

mod command;
mod coordinator;
mod engine;
mod error;
mod rebuild;
mod result;
mod workdir;

pub use command::CommandEngine;
pub use coordinator::RunCoordinator;
pub use engine::{Engine, PlaybookOutput};
pub use error::{EngineError, RunError};
pub use rebuild::rebuild_report;
pub use result::RunResult;
pub use workdir::{WorkingDir, create_run_dir};

// Run metadata lives with the report model.
pub use harden_report::{RunInfo, RunOutcome, RunWarning};
